//! Integration tests for relmatch


mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const RECORDS: &str = r#"{
  "release_versions": [
    {"release": "fake-release-name", "version": "1", "finalized": true},
    {"release": "fake-release-name", "version": "2", "finalized": false}
  ],
  "packages": [
    {"id": 1, "release": "fake-release-name", "name": "fake-pkg1", "version": "fake-pkg1-version",
     "fingerprint": "fake-pkg1-fingerprint", "artifact_id": "fake-pkg1-blobstoreid"},
    {"id": 2, "release": "fake-release-name", "name": "fake-pkg2", "version": "fake-pkg2-version",
     "fingerprint": "fake-pkg2-fingerprint"},
    {"id": 3, "release": "fake-release-name", "name": "fake-pkg3", "version": "fake-pkg3-version",
     "fingerprint": "fake-pkg3-fingerprint", "artifact_id": "fake-pkg3-blobstoreid"}
  ],
  "compiled_packages": [
    {"id": 1, "package_id": 1, "artifact_id": "cpkg1_blobstore_id", "target_image": "ubuntu-trusty/3000",
     "dependency_key": "[[\"fake-pkg2\",\"fake-pkg2-version\"],[\"fake-pkg3\",\"fake-pkg3-version\"]]"}
  ]
}"#;

    const SOURCE_MANIFEST: &str = r#"
name: fake-release-name
version: 1
packages:
  - fingerprint: fake-pkg1-fingerprint
  - fingerprint: fake-pkg2-fingerprint
  - fingerprint: fake-pkg3-fingerprint
"#;

    const COMPILED_MANIFEST: &str = r#"
name: fake-release-name
version: 1
compiled_packages:
  - name: fake-pkg1
    version: fake-pkg1-version
    fingerprint: fake-pkg1-fingerprint
    stemcell: ubuntu-trusty/3000
    dependencies: [fake-pkg2, fake-pkg3]
  - name: fake-pkg2
    version: fake-pkg2-version
    fingerprint: fake-pkg2-fingerprint
    stemcell: ubuntu-trusty/3000
    dependencies: []
  - name: fake-pkg3
    version: fake-pkg3-version
    fingerprint: fake-pkg3-fingerprint
    stemcell: ubuntu-trusty/3000
    dependencies: []
"#;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::write(
                dir.path().join("config.toml"),
                "[general]\naudit_log = false\n",
            )
            .unwrap();
            std::fs::write(dir.path().join("records.json"), RECORDS).unwrap();
            Self { dir }
        }

        fn file(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn cmd(&self) -> Command {
            let mut cmd = relmatch();
            cmd.env_remove("RELMATCH_STORE")
                .arg("--config")
                .arg(self.path("config.toml"));
            cmd
        }

        fn cmd_with_store(&self) -> Command {
            let mut cmd = self.cmd();
            cmd.arg("--store").arg(self.path("records.json"));
            cmd
        }
    }

    fn relmatch() -> Command {
        cargo_bin_cmd!("relmatch")
    }

    fn arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn help_displays() {
        relmatch()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Package provenance matching"));
    }

    #[test]
    fn version_displays() {
        relmatch()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("relmatch"));
    }

    #[test]
    fn match_reports_stored_source_packages() {
        let fixture = Fixture::new();
        let manifest = fixture.file("source.yml", SOURCE_MANIFEST);

        fixture
            .cmd_with_store()
            .args(["match", arg(&manifest)])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "[\"fake-pkg1-fingerprint\",\"fake-pkg3-fingerprint\"]\n",
            ));
    }

    #[test]
    fn match_plain_format() {
        let fixture = Fixture::new();
        let manifest = fixture.file("source.yml", SOURCE_MANIFEST);

        fixture
            .cmd_with_store()
            .args(["match", "--format", "plain", arg(&manifest)])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "fake-pkg1-fingerprint\nfake-pkg3-fingerprint\n",
            ));
    }

    #[test]
    fn match_unfinalized_version_is_empty() {
        let fixture = Fixture::new();
        let manifest = fixture.file(
            "source.yml",
            &SOURCE_MANIFEST.replace("version: 1", "version: 2"),
        );

        fixture
            .cmd_with_store()
            .args(["match", arg(&manifest)])
            .assert()
            .success()
            .stdout(predicate::str::diff("[]\n"));
    }

    #[test]
    fn match_compiled_reports_matching_closure() {
        let fixture = Fixture::new();
        let manifest = fixture.file("compiled.yml", COMPILED_MANIFEST);

        fixture
            .cmd_with_store()
            .args(["match-compiled", arg(&manifest)])
            .assert()
            .success()
            .stdout(predicate::str::diff("[\"fake-pkg1-fingerprint\"]\n"));
    }

    #[test]
    fn bad_manifest_fails_with_code() {
        let fixture = Fixture::new();
        let manifest = fixture.file("bad.yml", "name: fake-release-name\nversion: 1\npackages: ~\n");

        fixture
            .cmd_with_store()
            .args(["match", arg(&manifest)])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Manifest doesn't have a usable packages section",
            ))
            .stderr(predicate::str::contains("440001"));
    }

    #[test]
    fn missing_store_fails() {
        let fixture = Fixture::new();
        let manifest = fixture.file("source.yml", SOURCE_MANIFEST);

        fixture
            .cmd()
            .arg("--store")
            .arg(fixture.path("missing.json"))
            .args(["match", arg(&manifest)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Record store 'file' unavailable"));
    }

    #[test]
    fn unconfigured_store_fails() {
        let fixture = Fixture::new();
        let manifest = fixture.file("source.yml", SOURCE_MANIFEST);

        fixture
            .cmd()
            .args(["match", arg(&manifest)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no records document configured"));
    }

    #[test]
    fn match_without_release_is_empty() {
        let fixture = Fixture::new();
        let manifest = fixture.file(
            "compiled.yml",
            &COMPILED_MANIFEST.replace("name: fake-release-name\nversion: 1\n", ""),
        );

        fixture
            .cmd_with_store()
            .args(["match-compiled", arg(&manifest)])
            .assert()
            .success()
            .stdout(predicate::str::diff("[]\n"));
    }

    #[test]
    fn memory_backend_rejected_for_matching() {
        let fixture = Fixture::new();
        fixture.file("config.toml", "[general]\naudit_log = false\n\n[store]\nbackend = \"memory\"\n");
        let manifest = fixture.file("source.yml", SOURCE_MANIFEST);

        fixture
            .cmd()
            .args(["match", arg(&manifest)])
            .assert()
            .failure()
            .stderr(predicate::str::contains("backend \"memory\""));
    }

    #[test]
    fn dependency_key_prints_nested_closure() {
        let fixture = Fixture::new();
        let manifest = fixture.file("compiled.yml", COMPILED_MANIFEST);

        fixture
            .cmd()
            .args(["dependency-key", arg(&manifest), "fake-pkg1"])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "[[\"fake-pkg2\",\"fake-pkg2-version\"],[\"fake-pkg3\",\"fake-pkg3-version\"]]\n",
            ));
    }

    #[test]
    fn dependency_key_unknown_package() {
        let fixture = Fixture::new();
        let manifest = fixture.file("compiled.yml", COMPILED_MANIFEST);

        fixture
            .cmd()
            .args(["dependency-key", arg(&manifest), "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Package 'nope' not found"));
    }

    #[test]
    fn config_path() {
        let fixture = Fixture::new();
        fixture
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let fixture = Fixture::new();
        fixture
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[store]"))
            .stdout(predicate::str::contains("audit_log = false"));
    }
}
