//! Toolchain plugins and the resolution scopes they register.
//!
//! Scope names follow the conventions of the Android Gradle plugin 8.1 and
//! Kotlin 1.9 generation. Android scopes are expanded per build type.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::capitalize;

/// Build types every Android plugin creates variants for.
const BUILD_TYPES: &[&str] = &["debug", "release"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plugin {
  JavaLibrary,
  KotlinJvm,
  AndroidApplication,
  AndroidLibrary,
  KotlinAndroid,
  AndroidJunit5,
}

impl Plugin {
  /// The plugin identifier as written in a build script.
  pub fn id(&self) -> &'static str {
    match self {
      Plugin::JavaLibrary => "java-library",
      Plugin::KotlinJvm => "org.jetbrains.kotlin.jvm",
      Plugin::AndroidApplication => "com.android.application",
      Plugin::AndroidLibrary => "com.android.library",
      Plugin::KotlinAndroid => "org.jetbrains.kotlin.android",
      Plugin::AndroidJunit5 => "de.mannodermaus.android-junit5",
    }
  }

  /// Every scope name this plugin registers on a module.
  pub fn scopes(&self) -> BTreeSet<String> {
    match self {
      Plugin::JavaLibrary => owned(JAVA_LIBRARY),
      Plugin::KotlinJvm => owned(KOTLIN_JVM),
      Plugin::AndroidApplication => android_scopes(false),
      Plugin::AndroidLibrary => android_scopes(true),
      Plugin::KotlinAndroid => kotlin_android_scopes(),
      Plugin::AndroidJunit5 => owned(&["androidTestRuntimeOnly", "testRuntimeOnly"]),
    }
  }
}

impl fmt::Display for Plugin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

const JAVA_LIBRARY: &[&str] = &[
  "annotationProcessor",
  "api",
  "apiElements",
  "archives",
  "compileClasspath",
  "compileOnly",
  "compileOnlyApi",
  "default",
  "implementation",
  "mainSourceElements",
  "runtimeClasspath",
  "runtimeElements",
  "runtimeOnly",
  "testAnnotationProcessor",
  "testCompileClasspath",
  "testCompileOnly",
  "testImplementation",
  "testResultsElementsForTest",
  "testRuntimeClasspath",
  "testRuntimeOnly",
];

const KOTLIN_JVM: &[&str] = &[
  "apiDependenciesMetadata",
  "compileOnlyDependenciesMetadata",
  "implementationDependenciesMetadata",
  "intransitiveDependenciesMetadata",
  "kotlinBuildToolsApiClasspath",
  "kotlinCompilerClasspath",
  "kotlinCompilerPluginClasspath",
  "kotlinCompilerPluginClasspathMain",
  "kotlinCompilerPluginClasspathTest",
  "kotlinKlibCommonizerClasspath",
  "kotlinNativeCompilerPluginClasspath",
  "kotlinScriptDef",
  "kotlinScriptDefExtensions",
  "runtimeOnlyDependenciesMetadata",
  "testApiDependenciesMetadata",
  "testCompileOnlyDependenciesMetadata",
  "testImplementationDependenciesMetadata",
  "testIntransitiveDependenciesMetadata",
  "testRuntimeOnlyDependenciesMetadata",
];

const ANDROID_COMMON: &[&str] = &[
  "androidApis",
  "androidJdkImage",
  "androidTestAnnotationProcessor",
  "androidTestApi",
  "androidTestCompileOnly",
  "androidTestImplementation",
  "androidTestRuntimeOnly",
  "annotationProcessor",
  "api",
  "archives",
  "compileOnly",
  "coreLibraryDesugaring",
  "default",
  "implementation",
  "lintChecks",
  "runtimeOnly",
  "testAnnotationProcessor",
  "testApi",
  "testCompileOnly",
  "testFixturesApi",
  "testFixturesImplementation",
  "testImplementation",
  "testRuntimeOnly",
];

const KOTLIN_ANDROID_COMMON: &[&str] = &[
  "androidTestImplementationDependenciesMetadata",
  "implementationDependenciesMetadata",
  "kotlinBuildToolsApiClasspath",
  "kotlinCompilerClasspath",
  "kotlinCompilerPluginClasspath",
  "kotlinKlibCommonizerClasspath",
  "kotlinNativeCompilerPluginClasspath",
  "kotlinScriptDef",
  "kotlinScriptDefExtensions",
  "testFixturesImplementationDependenciesMetadata",
  "testImplementationDependenciesMetadata",
];

fn owned(names: &[&str]) -> BTreeSet<String> {
  names.iter().map(|s| s.to_string()).collect()
}

fn android_scopes(library: bool) -> BTreeSet<String> {
  let mut scopes = owned(ANDROID_COMMON);
  if library {
    scopes.insert("lintPublish".to_string());
  }

  for build_type in BUILD_TYPES {
    let upper = capitalize(build_type);
    for suffix in [
      "AnnotationProcessor",
      "AnnotationProcessorClasspath",
      "Api",
      "CompileClasspath",
      "CompileOnly",
      "Implementation",
      "RuntimeClasspath",
      "RuntimeOnly",
      "UnitTestAnnotationProcessorClasspath",
      "UnitTestCompileClasspath",
      "UnitTestRuntimeClasspath",
    ] {
      scopes.insert(format!("{build_type}{suffix}"));
    }
    scopes.insert(format!("test{upper}Api"));
    scopes.insert(format!("test{upper}Implementation"));
    scopes.insert(format!("testFixtures{upper}Implementation"));
    scopes.insert(format!("androidTest{upper}Implementation"));
    if library {
      scopes.insert(format!("{build_type}ApiElements"));
      scopes.insert(format!("{build_type}RuntimeElements"));
    }
  }

  // Instrumentation tests only run against the debug variant.
  for suffix in [
    "AndroidTestAnnotationProcessorClasspath",
    "AndroidTestCompileClasspath",
    "AndroidTestRuntimeClasspath",
  ] {
    scopes.insert(format!("debug{suffix}"));
  }

  scopes
}

fn kotlin_android_scopes() -> BTreeSet<String> {
  let mut scopes = owned(KOTLIN_ANDROID_COMMON);

  for build_type in BUILD_TYPES {
    let upper = capitalize(build_type);
    scopes.insert(format!("kotlinCompilerPluginClasspath{upper}"));
    scopes.insert(format!("kotlinCompilerPluginClasspath{upper}UnitTest"));
    scopes.insert(format!("{build_type}ImplementationDependenciesMetadata"));
    scopes.insert(format!("{build_type}UnitTestCompilationImplementation"));
    scopes.insert(format!("{build_type}UnitTestImplementation"));
    scopes.insert(format!("{build_type}UnitTestImplementationDependenciesMetadata"));
    scopes.insert(format!("test{upper}ImplementationDependenciesMetadata"));
    scopes.insert(format!("testFixtures{upper}ImplementationDependenciesMetadata"));
    scopes.insert(format!("androidTest{upper}ImplementationDependenciesMetadata"));
  }

  scopes.insert("kotlinCompilerPluginClasspathDebugAndroidTest".to_string());
  scopes.insert("debugAndroidTestCompilationImplementation".to_string());
  scopes.insert("debugAndroidTestImplementation".to_string());
  scopes.insert("debugAndroidTestImplementationDependenciesMetadata".to_string());

  scopes
}
