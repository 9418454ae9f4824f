//! Plain-text rendering of a timeline snapshot.

use std::fmt::Write;

use tootline_client::{DisplayPrefs, StatusEntry, TimelineSnapshot};

/// Render the visible statuses that pass the snapshot's filter.
pub fn render_timeline(snapshot: &TimelineSnapshot, prefs: &DisplayPrefs) -> String {
    let mut out = String::new();
    for status in snapshot.filtered() {
        render_status(&mut out, status, prefs);
    }
    let _ = writeln!(
        out,
        "-- {} visible, {} pending{}",
        snapshot.visible.len(),
        snapshot.pending.len(),
        if snapshot.filter.is_empty() {
            String::new()
        } else {
            format!(", filter {:?}", snapshot.filter)
        }
    );
    out
}

fn render_status(out: &mut String, status: &StatusEntry, prefs: &DisplayPrefs) {
    let shown = status.displayed();
    if status.reblog.is_some() {
        let _ = writeln!(
            out,
            "[{}] @{} reblogged @{}",
            status.id, status.account.acct, shown.account.acct
        );
    } else {
        let _ = writeln!(out, "[{}] @{}", status.id, shown.account.acct);
    }

    if !shown.spoiler_text.is_empty() {
        let _ = writeln!(out, "    CW: {}", shown.spoiler_text);
    }
    if shown.spoiler_text.is_empty() || prefs.cw {
        for line in strip_tags(&shown.content).lines() {
            let _ = writeln!(out, "    {line}");
        }
    }

    let media = shown.media_attachments.len();
    if media > 0 {
        if prefs.shows_attachments(shown.sensitive) {
            let _ = writeln!(out, "    [{media} attachment(s)]");
        } else {
            let _ = writeln!(out, "    [{media} attachment(s) hidden]");
        }
    }

    let _ = writeln!(
        out,
        "    fav {}{}  boost {}{}",
        shown.favourites_count,
        if shown.favourited { "*" } else { "" },
        shown.reblogs_count,
        if shown.reblogged { "*" } else { "" },
    );
}

/// Turn status HTML into plain text.
///
/// Tags are dropped, `</p>` and `<br>` become line breaks, and character
/// references are decoded. A `<` or `&` that doesn't start a tag or a known
/// reference is kept as written.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                if breaks_line(&rest[1..end]) {
                    text.push('\n');
                }
                rest = &rest[end + 1..];
                continue;
            }
        } else if c == '&' {
            if let Some((decoded, len)) = decode_entity(rest) {
                text.push(decoded);
                rest = &rest[len..];
                continue;
            }
        }
        text.push(c);
        rest = &rest[c.len_utf8()..];
    }
    text.trim_end_matches('\n').to_string()
}

fn breaks_line(tag: &str) -> bool {
    let closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("");
    name.eq_ignore_ascii_case("br") || (closing && name.eq_ignore_ascii_case("p"))
}

/// Decode the character reference at the start of `s` (which begins with
/// `&`), returning the character and how many bytes it spanned.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let end = s.bytes().take(12).position(|b| b == b';')?;
    let decoded = match &s[1..end] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        name => {
            let code = name.strip_prefix('#')?;
            let n = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(n)?
        }
    };
    Some((decoded, end + 1))
}
