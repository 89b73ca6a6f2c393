use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const INDEX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doxygenindex version="1.9.8" xml:lang="en-US">
  <compound refid="classgeo_1_1Point" kind="class"><name>geo::Point</name>
    <member refid="classgeo_1_1Point_1a01" kind=""><name>norm</name></member>
  </compound>
</doxygenindex>"#;

const POINT_XML: &str = r#"<doxygen version="1.9.8">
  <compounddef id="classgeo_1_1Point" kind="class" language="C++" prot="public">
    <compoundname>geo::Point</compoundname>
    <briefdescription><para>A point in 2D space.</para></briefdescription>
    <sectiondef kind="public-func">
      <memberdef kind="function" id="classgeo_1_1Point_1a01" prot="public" static="no" const="yes">
        <type>double</type>
        <definition>double geo::Point::norm</definition>
        <argsstring>() const</argsstring>
        <name>norm</name>
        <briefdescription><para>Distance from origin.</para></briefdescription>
        <location file="geo/point.hpp" line="20"/>
      </memberdef>
    </sectiondef>
    <location file="geo/point.hpp" line="10"/>
  </compounddef>
</doxygen>"#;

const DOXYFILE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doxyfile version="1.9.8">
  <option default="no" id="PROJECT_NAME" type="string"><value>Geometry Kit</value></option>
</doxyfile>"#;

fn write_fixture(dir: &std::path::Path) {
    fs::write(dir.join("index.xml"), INDEX_XML).unwrap();
    fs::write(dir.join("classgeo_1_1Point.xml"), POINT_XML).unwrap();
    fs::write(dir.join("Doxyfile.xml"), DOXYFILE_XML).unwrap();
}

#[test]
fn converts_a_minimal_corpus() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_fixture(input.path());

    let mut cmd = cargo_bin_cmd!("doxidown");
    cmd.arg("convert")
        .arg(input.path())
        .arg("-o")
        .arg(output.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Project: Geometry Kit"))
        .stdout(predicate::str::contains("Wrote 1 page(s)"));

    let page = fs::read_to_string(output.path().join("classgeo_1_1Point.md")).unwrap();
    assert!(page.contains("# class geo::Point"));
    assert!(page.contains("Distance from origin."));
    assert!(page.contains("```cpp"));
}

#[test]
fn default_subcommand_is_convert() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_fixture(input.path());

    let mut cmd = cargo_bin_cmd!("doxidown");
    cmd.arg(input.path()).arg("-o").arg(output.path());

    cmd.assert().success();
    assert!(output.path().join("classgeo_1_1Point.md").exists());
}

#[test]
fn html_flavor_writes_html_pages() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_fixture(input.path());

    let mut cmd = cargo_bin_cmd!("doxidown");
    cmd.arg("convert")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--flavor")
        .arg("html");

    cmd.assert().success();
    let page = fs::read_to_string(output.path().join("classgeo_1_1Point.html")).unwrap();
    assert!(page.contains("<h1>class geo::Point</h1>"));
}

#[test]
fn manifest_lists_generated_pages() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_fixture(input.path());

    let mut cmd = cargo_bin_cmd!("doxidown");
    cmd.arg("convert")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--manifest");

    cmd.assert().success();
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path().join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest[0]["refid"], "classgeo_1_1Point");
    assert_eq!(manifest[0]["path"], "classgeo_1_1Point.md");
}

#[test]
fn missing_index_is_fatal() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("doxidown");
    cmd.arg("convert")
        .arg(input.path())
        .arg("-o")
        .arg(output.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("index.xml"));
}

#[test]
fn grammar_violation_aborts_the_run() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_fixture(input.path());
    // A compounddef without its mandatory compoundname.
    fs::write(
        input.path().join("classgeo_1_1Point.xml"),
        r#"<doxygen><compounddef id="classgeo_1_1Point" kind="class"/></doxygen>"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("doxidown");
    cmd.arg("convert")
        .arg(input.path())
        .arg("-o")
        .arg(output.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("compoundname"));
}
