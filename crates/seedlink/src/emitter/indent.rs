//! Re-indentation of exported literals to the template's nesting depth.

/// Re-indents `text` line by line.
///
/// The first line is left alone since it continues the statement it is
/// spliced into. Every following line is stripped of leading whitespace
/// and prefixed with `depth` copies of `unit`; the depth drops before a
/// line holding a closing bracket and rises after a line holding an
/// opening bracket. Lines that begin inside a quoted string are string
/// content and are copied verbatim. Brackets inside strings are ignored.
pub fn reindent(text: &str, base_depth: usize, unit: &str) -> String {
    let mut lines = text.split('\n');
    let mut out: Vec<String> = Vec::new();
    if let Some(first) = lines.next() {
        out.push(first.to_string());
    }

    let mut depth = base_depth;
    let mut in_string = false;
    for line in lines {
        let starts_in_string = in_string;
        let content = if starts_in_string {
            line
        } else {
            line.trim_start()
        };

        let scan = scan_line(content, in_string);
        in_string = scan.in_string;

        if scan.closes {
            depth = depth.saturating_sub(1);
        }
        if starts_in_string {
            out.push(content.to_string());
        } else {
            out.push(unit.repeat(depth) + content);
        }
        if scan.opens {
            depth += 1;
        }
    }

    out.join("\n")
}

struct LineScan {
    opens: bool,
    closes: bool,
    in_string: bool,
}

/// Tracks single-quote state across the line. A backslash skips the
/// character after it.
fn scan_line(line: &str, mut in_string: bool) -> LineScan {
    let mut opens = false;
    let mut closes = false;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' => in_string = !in_string,
            '(' if !in_string => opens = true,
            ')' if !in_string => closes = true,
            _ => {}
        }
    }
    LineScan {
        opens,
        closes,
        in_string,
    }
}
