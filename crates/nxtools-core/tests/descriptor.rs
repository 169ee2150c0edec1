mod support;

use std::path::Path;

use tempfile::TempDir;

use nxtools_core::descriptor::{ArtifactDescriptor, DISTRIBUTION_SUFFIX, LIBRARY_SUFFIX};
use nxtools_core::error::{FailureSite, NxError};

use support::write_pom;

#[test]
fn read_own_version() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("foo");
    write_pom(
        &module,
        "<parent><artifactId>p</artifactId><version>1.0</version></parent>\n\
         <artifactId>foo</artifactId>\n<version>2.0</version>",
    );

    let descriptor = ArtifactDescriptor::read(&module, LIBRARY_SUFFIX).unwrap();

    assert_eq!(descriptor.version, "2.0");
    assert_eq!(descriptor.name, "foo-2.0");
    assert_eq!(descriptor.output_path, module.join("target").join("foo-2.0.jar"));
}

#[test]
fn read_distribution_suffix() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("foo");
    write_pom(&module, "<artifactId>foo</artifactId>\n<version>2.0</version>");

    let descriptor = ArtifactDescriptor::read(&module, DISTRIBUTION_SUFFIX).unwrap();

    assert!(descriptor.output_path.ends_with("target/foo-2.0-bin.tar.gz"));
}

#[test]
fn read_inherits_parent_version() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("events/api");
    write_pom(
        &module,
        "<parent>\n<groupId>org.sonatype.xaven</groupId>\n<artifactId>events</artifactId>\n\
         <version>1.0-SNAPSHOT</version>\n</parent>\n<artifactId>api</artifactId>",
    );

    let descriptor = ArtifactDescriptor::read_library(&module).unwrap();

    assert_eq!(descriptor.version, "1.0-SNAPSHOT");
    assert_eq!(descriptor.name, "api-1.0-SNAPSHOT");
}

#[test]
fn read_missing_pom_is_precondition_failure() {
    let temp = TempDir::new().unwrap();

    let err = ArtifactDescriptor::read_library(&temp.path().join("nowhere")).unwrap_err();

    assert!(matches!(err, NxError::DescriptorMissing { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().starts_with("Cannot read POM"));
}

#[test]
fn read_without_any_version_is_reported() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("orphan");
    write_pom(&module, "<artifactId>orphan</artifactId>");

    let err = ArtifactDescriptor::read_library(&module).unwrap_err();

    assert_eq!(err.site(), FailureSite::InvalidDescriptor);
    assert!(err.to_string().contains("no <version>"));
}

#[test]
fn read_malformed_xml_is_reported() {
    let temp = TempDir::new().unwrap();
    let module = temp.path().join("broken");
    std::fs::create_dir_all(&module).unwrap();
    std::fs::write(module.join("pom.xml"), "<project><artifactId>x</project>").unwrap();

    let err = ArtifactDescriptor::read_library(&module).unwrap_err();

    assert_eq!(err.exit_code(), 6);
}

#[test]
fn relative_directories_stay_relative() {
    let descriptor =
        ArtifactDescriptor::from_coordinates(Path::new("events/api"), "api", "1.0", LIBRARY_SUFFIX);
    assert_eq!(descriptor.output_path, Path::new("events/api/target/api-1.0.jar"));
}
