//! # Tool Path Resolver
//!
//! This module finds the external executables the converter shells out to:
//! - `ffprobe` to read the codec of the first video stream
//! - `ffmpeg` to transcode
//!
//! Search order: system `PATH`, then a fixed list of conventional install
//! directories, then the bare executable name (the spawn fails later with a
//! "not found" error). Results are resolved once per process and reused.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Tool path resolver over `PATH` and conventional install locations
#[derive(Debug, Clone)]
pub struct ToolLocator {
    /// Raw `PATH` value searched first
    search_path: Option<OsString>,
    /// Conventional install directories, checked in order after `PATH`
    candidate_dirs: Vec<PathBuf>,
}

impl ToolLocator {
    /// Create a locator from the current process environment
    pub fn new() -> Self {
        Self {
            search_path: env::var_os("PATH"),
            candidate_dirs: Self::conventional_dirs(),
        }
    }

    /// Create a locator with an explicit search path and candidate directories
    pub fn with_search(search_path: Option<OsString>, candidate_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_path,
            candidate_dirs,
        }
    }

    /// Platform-conventional install directories
    fn conventional_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        // Direct override, same spirit as a bundled tools directory
        if let Some(tools_dir) = env::var_os("TOOLS_DIR") {
            dirs.push(PathBuf::from(tools_dir));
        }

        if cfg!(windows) {
            let program_files = env::var_os("ProgramFiles")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(r"C:\Program Files"));
            let program_files_x86 = env::var_os("ProgramFiles(x86)")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(r"C:\Program Files (x86)"));

            dirs.push(program_files.join("FFmpeg").join("bin"));
            dirs.push(program_files_x86.join("FFmpeg").join("bin"));
            dirs.push(PathBuf::from(r"C:\ffmpeg\bin"));
        } else {
            dirs.push(PathBuf::from("/usr/local/bin"));
            dirs.push(PathBuf::from("/opt/homebrew/bin"));
            dirs.push(PathBuf::from("/opt/ffmpeg/bin"));
        }

        // Next to the running program
        if let Some(app_dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
            dirs.push(app_dir.join("ffmpeg").join("bin"));
        }

        dirs
    }

    /// Platform file name of an executable (`ffmpeg.exe` on Windows)
    pub fn executable_name(tool_name: &str) -> String {
        if cfg!(windows) {
            format!("{}.exe", tool_name)
        } else {
            tool_name.to_string()
        }
    }

    /// Resolve the path to a tool, falling back to the bare name
    pub fn locate(&self, tool_name: &str) -> PathBuf {
        self.resolve_tool(tool_name).unwrap_or_else(|| {
            warn!("Tool not found, falling back to bare name: {}", tool_name);
            PathBuf::from(tool_name)
        })
    }

    /// Resolve the path to a tool, `None` when it is nowhere to be found
    pub fn resolve_tool(&self, tool_name: &str) -> Option<PathBuf> {
        debug!("Resolving tool: {}", tool_name);

        if let Some(system_path) = self.find_in_system_path(tool_name) {
            debug!("Using system tool: {} -> {:?}", tool_name, system_path);
            return Some(system_path);
        }

        let executable = Self::executable_name(tool_name);
        for dir in &self.candidate_dirs {
            let candidate = dir.join(&executable);
            debug!("Checking install path: {:?}", candidate);
            if candidate.is_file() {
                debug!("Using installed tool: {} -> {:?}", tool_name, candidate);
                return Some(candidate);
            }
        }

        None
    }

    /// Find tool in system PATH
    fn find_in_system_path(&self, tool_name: &str) -> Option<PathBuf> {
        let executable = Self::executable_name(tool_name);
        let search_path = self.search_path.as_ref()?;

        env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(&executable))
            .find(|path| path.is_file())
    }

    /// Check if a specific tool is available
    pub fn is_tool_available(&self, tool_name: &str) -> bool {
        self.resolve_tool(tool_name).is_some()
    }

    /// Get installation instructions for a tool
    fn install_instructions(tool_name: &str) -> String {
        match tool_name {
            "ffmpeg" | "ffprobe" if cfg!(target_os = "linux") => "sudo apt-get install ffmpeg".to_string(),
            "ffmpeg" | "ffprobe" if cfg!(target_os = "macos") => "brew install ffmpeg".to_string(),
            "ffmpeg" | "ffprobe" => {
                r"download a build from https://ffmpeg.org/download.html into C:\ffmpeg\bin".to_string()
            }
            _ => format!("install {} and make sure it is on PATH", tool_name),
        }
    }

    /// Get a report of tool availability
    pub fn tools_report(&self) -> String {
        let mut report = String::new();
        report.push_str("Tool Path Resolver Report\n");
        report.push_str(&format!("Platform: {} {}\n", env::consts::OS, env::consts::ARCH));
        report.push_str("\nSearch order: PATH, then:\n");
        for dir in &self.candidate_dirs {
            report.push_str(&format!("  {}\n", dir.display()));
        }
        report.push_str("\nTool Availability:\n");

        for tool in REQUIRED_TOOLS {
            match self.resolve_tool(tool) {
                Some(path) => report.push_str(&format!("  ✅ {} -> {}\n", tool, path.display())),
                None => report.push_str(&format!(
                    "  ❌ {} (install with: {})\n",
                    tool,
                    Self::install_instructions(tool)
                )),
            }
        }

        report
    }
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// External tools the converter needs
pub const REQUIRED_TOOLS: [&str; 2] = ["ffprobe", "ffmpeg"];

/// Resolved tool paths, shared for the whole process lifetime
#[derive(Debug, Clone)]
pub struct ResolvedTools {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl ResolvedTools {
    /// Get the process-wide instance, resolved on first use
    pub fn global() -> &'static Self {
        static INSTANCE: OnceLock<ResolvedTools> = OnceLock::new();
        INSTANCE.get_or_init(|| Self::resolve(&ToolLocator::new()))
    }

    pub fn resolve(locator: &ToolLocator) -> Self {
        Self {
            ffmpeg: locator.locate("ffmpeg"),
            ffprobe: locator.locate("ffprobe"),
        }
    }
}
