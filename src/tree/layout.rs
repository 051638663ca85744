use super::walk::RawEntry;
use super::TreeEntry;

const BRANCH: &str = "\u{251c}\u{2500}\u{2500} "; // ├──
const CORNER: &str = "\u{2514}\u{2500}\u{2500} "; // └──
const PIPE: &str = "\u{2502}   "; // │
const BLANK: &str = "    ";

/// Compute `is_last` flags and prefix strings for pre-ordered entries.
pub(super) fn compute_tree_structure(raw: &[RawEntry]) -> Vec<TreeEntry> {
    let mut entries: Vec<TreeEntry> = raw
        .iter()
        .enumerate()
        .map(|(i, r)| TreeEntry {
            name: r.name.clone(),
            path: r.path.clone(),
            depth: r.depth,
            kind: r.kind.clone(),
            is_last: is_last_sibling(raw, i),
            prefix: String::new(),
        })
        .collect();

    compute_prefixes(&mut entries);
    entries
}

/// Whether the entry at `i` has no later sibling under the same parent.
fn is_last_sibling(raw: &[RawEntry], i: usize) -> bool {
    let depth = raw[i].depth;
    raw[i + 1..]
        .iter()
        .map(|r| r.depth)
        .find(|&d| d <= depth)
        .map_or(true, |d| d < depth)
}

/// Fill in prefixes from the `is_last` flags of each entry's ancestors.
fn compute_prefixes(entries: &mut [TreeEntry]) {
    // ancestor_is_last[d - 1] is the flag of the open ancestor at depth d.
    let mut ancestor_is_last: Vec<bool> = Vec::new();

    for entry in entries.iter_mut() {
        let depth = entry.depth;
        ancestor_is_last.truncate(depth.saturating_sub(1));

        let mut prefix: String = ancestor_is_last
            .iter()
            .map(|&last| if last { BLANK } else { PIPE })
            .collect();
        if depth > 0 {
            prefix.push_str(if entry.is_last { CORNER } else { BRANCH });
        }
        entry.prefix = prefix;

        ancestor_is_last.push(entry.is_last);
    }
}
