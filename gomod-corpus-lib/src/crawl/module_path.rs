/// Extract the module path from the text of a `go.mod` file.
///
/// The first `module` directive wins. `//` comments are ignored, and quoted paths (either
/// interpreted `"..."` or raw `` `...` ``) are unquoted. Returns `None` when there is no
/// directive, the path is empty, or the quoting is malformed.
#[must_use]
pub fn module_path(text: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.split_once("//").map_or(line, |(code, _comment)| code).trim();

        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };

        // the keyword must be followed by whitespace and then something
        let path = rest.trim_start();
        if path.is_empty() || path.len() == rest.len() {
            continue;
        }

        let path = if path.starts_with(['"', '`']) { unquote(path)? } else { path.to_string() };
        return (!path.is_empty()).then_some(path);
    }

    None
}

fn unquote(quoted: &str) -> Option<String> {
    if let Some(raw) = quoted.strip_prefix('`') {
        let raw = raw.strip_suffix('`')?;
        return (!raw.contains('`')).then(|| raw.to_string());
    }

    // interpreted strings share their escape syntax with JSON for everything a module path can contain
    serde_json::from_str::<String>(quoted).ok()
}
