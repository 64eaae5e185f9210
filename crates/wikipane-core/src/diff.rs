pub trait DiffRenderer {
    fn diff(&self, old: &str, new: &str) -> String;
}

/// Line-level diff rendered as HTML: removed lines wrapped in `<del>`,
/// added lines in `<ins>`, unchanged lines passed through escaped.
#[derive(Debug, Default)]
pub struct LineDiff;

#[derive(Clone, Copy)]
enum Op {
    Equal,
    Delete,
    Insert,
}

impl DiffRenderer for LineDiff {
    fn diff(&self, old: &str, new: &str) -> String {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);
        let ops = diff_ops(&old_lines, &new_lines);

        let mut out = String::new();
        let mut old_idx = 0usize;
        let mut new_idx = 0usize;

        for op in ops {
            match op {
                Op::Equal => {
                    push_line(&mut out, None, &new_lines[new_idx]);
                    old_idx += 1;
                    new_idx += 1;
                }
                Op::Delete => {
                    push_line(&mut out, Some("del"), &old_lines[old_idx]);
                    old_idx += 1;
                }
                Op::Insert => {
                    push_line(&mut out, Some("ins"), &new_lines[new_idx]);
                    new_idx += 1;
                }
            }
        }

        out
    }
}

fn push_line(out: &mut String, tag: Option<&str>, line: &str) {
    match tag {
        Some(tag) => {
            out.push('<');
            out.push_str(tag);
            out.push('>');
            out.push_str(&escape_html(line));
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        None => out.push_str(&escape_html(line)),
    }
    out.push('\n');
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(ToString::to_string).collect()
}

fn diff_ops(old: &[String], new: &[String]) -> Vec<Op> {
    let n = old.len();
    let m = new.len();
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut i = 0usize;
    let mut j = 0usize;
    let mut ops = Vec::new();

    while i < n && j < m {
        if old[i] == new[j] {
            ops.push(Op::Equal);
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(Op::Delete);
            i += 1;
        } else {
            ops.push(Op::Insert);
            j += 1;
        }
    }

    while i < n {
        ops.push(Op::Delete);
        i += 1;
    }
    while j < m {
        ops.push(Op::Insert);
        j += 1;
    }

    ops
}
