use confdiff_types::Value;
use tracing::warn;

/// Descend into `root` along a dot-separated key path such as
/// `ipo.robot.robot_prog_settings`.
///
/// If any key is missing, or an intermediate value is not a mapping, a
/// warning is logged and `root` itself is returned. An empty path returns
/// `root`.
pub fn navigate<'a>(root: &'a Value, dot_path: &str) -> &'a Value {
    if dot_path.is_empty() {
        return root;
    }

    let mut current = root;
    for key in dot_path.split('.') {
        match current.get(key) {
            Some(next) => current = next,
            None => {
                warn!(key, path = dot_path, "key not found; comparing from the top of the document");
                return root;
            }
        }
    }
    current
}
