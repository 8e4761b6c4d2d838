use crate::metadata::ModuleKind;
use std::time::Duration;

/// The capability set every parsed manifest exposes, regardless of standard.
///
/// String accessors return the empty string, never a distinct null, when the
/// underlying document did not carry a usable value. `launch_url` is `None`
/// only when the reference chain (default organization, first leaf item,
/// resource href, assignable unit, activity) cannot be resolved at all;
/// parsers treat that as a missing required field.
pub trait PackageManifest {
    fn module_kind(&self) -> ModuleKind;

    fn title(&self) -> &str;

    fn description(&self) -> &str;

    fn identifier(&self) -> &str;

    fn version(&self) -> &str;

    /// Relative path of the first executable resource.
    fn launch_url(&self) -> Option<String>;

    /// Declared typical duration; zero if unspecified.
    fn duration(&self) -> Duration {
        Duration::ZERO
    }
}
