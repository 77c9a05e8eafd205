//! Application initialization.
//!
//! Process-wide setup performed once by the binary before an export run.

mod logger;

// Re-export public API
pub use logger::init_logger_with;

/// Loads a `.env` file, first from the current directory and then from the
/// directory of the running executable.
///
/// Missing files are not an error; variables already set in the environment
/// are never overwritten.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }
}
