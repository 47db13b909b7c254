//! Version lookup by running a metadata module.
//!
//! Only for trusted input: the module's top-level code is executed by the
//! configured interpreter. Anything the module prints is discarded.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Result, VercheckError};

/// Driver run by the interpreter as `-c DRIVER <path> <attribute>`.
const DRIVER: &str = r#"
import contextlib
import io
import runpy
import sys

path, attribute = sys.argv[1], sys.argv[2]
try:
    with contextlib.redirect_stdout(io.StringIO()):
        namespace = runpy.run_path(path, run_name="__vercheck__")
except BaseException as exc:
    sys.stderr.write("%s: %s" % (type(exc).__name__, exc))
    sys.exit(2)
if attribute not in namespace:
    sys.exit(3)
value = namespace[attribute]
if not isinstance(value, str):
    sys.exit(4)
sys.stdout.write(value)
"#;

const DRIVER_MISSING_ATTRIBUTE: i32 = 3;
const DRIVER_NOT_TEXT: i32 = 4;

/// Runs the module at `path` with `interpreter` and returns its `attribute`.
///
/// # Returns
/// * `Ok(String)` - the attribute's text value
/// * `Err(ModuleLoad)` - the interpreter could not start or the module failed to run
/// * `Err(MissingAttribute)` / `Err(NotText)` - the module ran but has no usable version
pub fn run_module_version(path: &Path, attribute: &str, interpreter: &str) -> Result<String> {
    if !path.is_file() {
        return Err(VercheckError::module_load(
            path,
            if path.exists() {
                "not a file"
            } else {
                "no such file"
            },
        ));
    }

    debug!(interpreter, path = %path.display(), "executing metadata module");
    let output = Command::new(interpreter)
        .arg("-c")
        .arg(DRIVER)
        .arg(path)
        .arg(attribute)
        .output()
        .map_err(|e| {
            VercheckError::module_load(path, format!("cannot run {}: {}", interpreter, e))
        })?;

    match output.status.code() {
        Some(0) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
        Some(DRIVER_MISSING_ATTRIBUTE) => Err(VercheckError::MissingAttribute {
            path: path.to_path_buf(),
            attribute: attribute.to_string(),
        }),
        Some(DRIVER_NOT_TEXT) => Err(VercheckError::NotText {
            path: path.to_path_buf(),
        }),
        code => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("{} exited with status {}", interpreter, code.unwrap_or(-1)),
                message => message.to_string(),
            };
            Err(VercheckError::module_load(path, reason))
        }
    }
}
