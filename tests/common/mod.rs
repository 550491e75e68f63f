#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub ceps: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let ceps = make_fixture_ceps(&root);
        Self {
            _tmp: tmp,
            root,
            ceps,
        }
    }

    /// Binary with the lookup source pinned to the fixture directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("solicita");
        cmd.env_remove("SOLICITA_TIMEOUT_MS")
            .env_remove("SOLICITA_NOTIFICATION_TTL_MS")
            .env_remove("SOLICITA_SEARCH_DEBOUNCE_MS")
            .env("SOLICITA_CEP_SOURCE", &self.ceps)
            .env("RUST_LOG", "off");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, serde_json::to_string_pretty(value).expect("encode"))
            .expect("write fixture");
        path
    }

    pub fn path_str<'a>(&self, p: &'a Path) -> &'a str {
        p.to_str().expect("utf8 path")
    }
}

fn make_fixture_ceps(base: &Path) -> PathBuf {
    let dir = base.join("ceps");
    fs::create_dir_all(&dir).expect("create cep fixtures");
    let fixtures = [
        (
            "01001000",
            json!({
                "cep": "01001-000",
                "logradouro": "Praça da Sé",
                "complemento": "lado ímpar",
                "bairro": "Sé",
                "localidade": "São Paulo",
                "uf": "SP"
            }),
        ),
        ("99999999", json!({ "erro": true })),
        (
            "70000000",
            json!({ "cep": "70000-000", "logradouro": "", "bairro": " ", "localidade": "", "uf": "" }),
        ),
    ];
    for (cep, body) in fixtures {
        fs::write(dir.join(format!("{}.json", cep)), body.to_string()).expect("write cep");
    }
    dir
}
