//! Shared helpers for library tests.

use std::path::Path;

use keel_lib::build::{BuildContext, BuildDescription};
use keel_lib::module::Module;
use keel_lib::policy::AllowList;
use keel_lib::tool::ToolDescriptor;

/// A context rooted at `root` with the built-in allow-list.
pub fn context(root: &Path) -> BuildContext {
  BuildContext {
    root: root.to_path_buf(),
    build_dir: root.join("build"),
    allow_list: AllowList::builtin(),
    tool: ToolDescriptor::ktlint(root),
  }
}

/// Modules declared by a `keel.toml` snippet.
pub fn modules(toml: &str) -> Vec<Module> {
  let description = BuildDescription::parse(toml).unwrap();
  description.validate().unwrap();
  description.modules()
}

pub const SHARED_PROPERTIES: &str = r#"
[properties]
GROUP = "org.example"
VERSION_NAME = "1.0.0"
"build.jdkBuild" = 17
"build.jdkBytecodeTarget" = 11
"build.androidSDKCompile" = 34
"build.androidSDKTarget" = 34
"build.androidSDKMinimum" = 21
"#;
