use std::path::Path;

pub(crate) mod bytecode;
pub(crate) mod interpreted;
pub(crate) mod native;

/// The name of the source file as it should be passed on the command line.
fn source_name(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string_lossy().to_string());
    // names starting with - can be interpreted as command line options
    if name.starts_with('-') {
        format!("./{}", name)
    } else {
        name
    }
}
