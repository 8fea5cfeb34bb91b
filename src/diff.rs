/*!
 * Human-readable differences between a translation and its sanitized form.
 *
 * The raw character diff comes from `dissimilar` (Myers diff with semantic
 * cleanup). On top of that an efficiency pass folds short equalities that are
 * sandwiched between edits into the surrounding edits, so a stripped attribute
 * shows up as one hunk instead of a handful of single characters.
 */

/// Equalities shorter than this many characters are folded into nearby edits
const EDIT_COST: usize = 4;

const ANSI_DELETE: &str = "\x1b[31m";
const ANSI_INSERT: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

/// Kind of a diff hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    Equal,
    Delete,
    Insert,
}

/// One diff hunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub op: DiffOp,
    pub text: String,
}

impl Edit {
    /// Hunk of kind `op` covering `text`
    pub fn new(op: DiffOp, text: impl Into<String>) -> Self {
        Self { op, text: text.into() }
    }
}

/// How deletions and insertions are marked when a diff is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffStyle {
    /// Red deletions and green insertions using ANSI escapes
    #[default]
    Ansi,
    /// `[-deleted-]` and `{+inserted+}` markers
    Plain,
}

/// Compute the cleaned-up diff that turns `expected` into `actual`
pub fn diff(expected: &str, actual: &str) -> Vec<Edit> {
    let mut edits: Vec<Edit> = dissimilar::diff(expected, actual)
        .into_iter()
        .map(|chunk| match chunk {
            dissimilar::Chunk::Equal(text) => Edit::new(DiffOp::Equal, text),
            dissimilar::Chunk::Delete(text) => Edit::new(DiffOp::Delete, text),
            dissimilar::Chunk::Insert(text) => Edit::new(DiffOp::Insert, text),
        })
        .collect();

    cleanup_efficiency(&mut edits);
    edits
}

/// Render edits inline, marking deletions and insertions according to `style`
pub fn render(edits: &[Edit], style: DiffStyle) -> String {
    let mut out = String::new();
    for edit in edits {
        match (edit.op, style) {
            (DiffOp::Equal, _) => out.push_str(&edit.text),
            (DiffOp::Delete, DiffStyle::Ansi) => {
                out.push_str(ANSI_DELETE);
                out.push_str(&edit.text);
                out.push_str(ANSI_RESET);
            }
            (DiffOp::Insert, DiffStyle::Ansi) => {
                out.push_str(ANSI_INSERT);
                out.push_str(&edit.text);
                out.push_str(ANSI_RESET);
            }
            (DiffOp::Delete, DiffStyle::Plain) => {
                out.push_str("[-");
                out.push_str(&edit.text);
                out.push_str("-]");
            }
            (DiffOp::Insert, DiffStyle::Plain) => {
                out.push_str("{+");
                out.push_str(&edit.text);
                out.push_str("+}");
            }
        }
    }
    out
}

/// Diff `expected` against `actual` and render the result in one go
pub fn pretty_diff(expected: &str, actual: &str, style: DiffStyle) -> String {
    render(&diff(expected, actual), style)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte length of the longest common prefix, on a char boundary
fn common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Byte length of the longest common suffix, on a char boundary
fn common_suffix(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().rev().zip(b.chars().rev()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}

/// Fold short equalities surrounded by edits into those edits
fn cleanup_efficiency(edits: &mut Vec<Edit>) {
    let mut changes = false;
    // Indices of candidate equalities
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<String> = None;
    let mut pointer: isize = 0;
    // Is there an insertion/deletion before/after the last equality
    let mut pre_ins = false;
    let mut pre_del = false;
    let mut post_ins = false;
    let mut post_del = false;

    while (pointer as usize) < edits.len() {
        let p = pointer as usize;
        if edits[p].op == DiffOp::Equal {
            if char_len(&edits[p].text) < EDIT_COST && (post_ins || post_del) {
                equalities.push(p);
                pre_ins = post_ins;
                pre_del = post_del;
                last_equality = Some(edits[p].text.clone());
            } else {
                equalities.clear();
                last_equality = None;
            }
            post_ins = false;
            post_del = false;
        } else {
            if edits[p].op == DiffOp::Delete {
                post_del = true;
            } else {
                post_ins = true;
            }

            // Fold when the equality has edits of both kinds on both sides, or
            // when it is very short and three of the four sides are edits.
            if let (Some(equality), Some(&at)) = (last_equality.clone(), equalities.last()) {
                let sides = [pre_ins, pre_del, post_ins, post_del]
                    .iter()
                    .filter(|side| **side)
                    .count();
                if sides == 4 || (char_len(&equality) < EDIT_COST / 2 && sides == 3) {
                    edits.insert(at, Edit::new(DiffOp::Delete, equality));
                    edits[at + 1].op = DiffOp::Insert;
                    equalities.pop();
                    last_equality = None;
                    if pre_ins && pre_del {
                        // No changes made which could affect previous entry, keep going.
                        post_ins = true;
                        post_del = true;
                        equalities.clear();
                    } else {
                        // Throw away the previous equality and walk back to the one before it.
                        equalities.pop();
                        pointer = equalities.last().map(|&i| i as isize).unwrap_or(-1);
                        post_ins = false;
                        post_del = false;
                    }
                    changes = true;
                }
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
    }
}

/// Merge adjacent hunks of the same kind and factor out common affixes
fn cleanup_merge(edits: &mut Vec<Edit>) {
    // Sentinel so the last run of edits gets flushed
    edits.push(Edit::new(DiffOp::Equal, ""));
    let mut pointer = 0usize;
    let mut count_delete = 0usize;
    let mut count_insert = 0usize;
    let mut text_delete = String::new();
    let mut text_insert = String::new();

    while pointer < edits.len() {
        match edits[pointer].op {
            DiffOp::Insert => {
                count_insert += 1;
                text_insert.push_str(&edits[pointer].text);
                pointer += 1;
            }
            DiffOp::Delete => {
                count_delete += 1;
                text_delete.push_str(&edits[pointer].text);
                pointer += 1;
            }
            DiffOp::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let prefix = common_prefix(&text_insert, &text_delete);
                        if prefix != 0 {
                            let start = pointer - count_delete - count_insert;
                            let common = text_insert[..prefix].to_string();
                            if start > 0 && edits[start - 1].op == DiffOp::Equal {
                                edits[start - 1].text.push_str(&common);
                            } else {
                                edits.insert(0, Edit::new(DiffOp::Equal, common));
                                pointer += 1;
                            }
                            text_insert = text_insert[prefix..].to_string();
                            text_delete = text_delete[prefix..].to_string();
                        }

                        let suffix = common_suffix(&text_insert, &text_delete);
                        if suffix != 0 {
                            let split_ins = text_insert.len() - suffix;
                            let split_del = text_delete.len() - suffix;
                            let mut merged = text_insert[split_ins..].to_string();
                            merged.push_str(&edits[pointer].text);
                            edits[pointer].text = merged;
                            text_insert.truncate(split_ins);
                            text_delete.truncate(split_del);
                        }
                    }

                    pointer -= count_delete + count_insert;
                    edits.drain(pointer..pointer + count_delete + count_insert);
                    if !text_delete.is_empty() {
                        edits.insert(pointer, Edit::new(DiffOp::Delete, text_delete.clone()));
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        edits.insert(pointer, Edit::new(DiffOp::Insert, text_insert.clone()));
                        pointer += 1;
                    }
                    pointer += 1;
                } else if pointer != 0 && edits[pointer - 1].op == DiffOp::Equal {
                    let text = edits.remove(pointer).text;
                    edits[pointer - 1].text.push_str(&text);
                } else {
                    pointer += 1;
                }
                count_insert = 0;
                count_delete = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }

    if edits.last().is_some_and(|e| e.text.is_empty()) {
        edits.pop();
    }

    // Slide single edits that are surrounded by equalities sideways when that
    // removes one of the equalities: A<ins>BA</ins>C -> <ins>AB</ins>AC
    let mut changes = false;
    let mut pointer = 1usize;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].op == DiffOp::Equal && edits[pointer + 1].op == DiffOp::Equal {
            let prev = edits[pointer - 1].text.clone();
            let next = edits[pointer + 1].text.clone();
            if edits[pointer].text.ends_with(&prev) {
                let keep = edits[pointer].text.len() - prev.len();
                let shifted = format!("{}{}", prev, &edits[pointer].text[..keep]);
                edits[pointer].text = shifted;
                edits[pointer + 1].text = format!("{}{}", prev, next);
                edits.remove(pointer - 1);
                changes = true;
            } else if edits[pointer].text.starts_with(&next) {
                edits[pointer - 1].text.push_str(&next);
                let shifted = format!("{}{}", &edits[pointer].text[next.len()..], next);
                edits[pointer].text = shifted;
                edits.remove(pointer + 1);
                changes = true;
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
    }
}
