use std::path::Path;

use regex::Regex;

/// Replace the project root in a rendered report with `<root>` and use
/// forward slashes for everything below it.
pub fn sanitize_root(input: &str, root: &Path) -> String {
    let root = regex::escape(&root.to_string_lossy());
    let path_re = Regex::new(&format!(r#"{root}(?P<rest>[^"\n:<]*)"#)).unwrap();

    path_re
        .replace_all(input, |caps: &regex::Captures| {
            format!("<root>{}", caps["rest"].replace('\\', "/"))
        })
        .into_owned()
}
