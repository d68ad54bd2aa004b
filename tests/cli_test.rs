//! Runs the `crude-or-rude` binary end to end in offline mode.
#![cfg(feature = "cli")]

use std::process::{Command, Output};

use serde_json::Value;

fn crude_or_rude(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crude-or-rude"))
        .args(["--offline", "--json", "--seed", "7"])
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("binary runs")
}

fn json_documents(output: &Output) -> Vec<Value> {
    serde_json::Deserializer::from_slice(&output.stdout)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("stdout is a stream of JSON documents")
}

#[test]
fn words_form_one_headline() {
    let output = crude_or_rude(&["Oil", "market", "crashes", "and", "devastates", "investors"]);
    assert!(output.status.success());

    let docs = json_documents(&output);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["headline"], "Oil market crashes and devastates investors");
    assert_eq!(docs[0]["market_sentiment"]["category"], "PanicStricken");
}

#[test]
fn no_headline_runs_every_sample() {
    let output = crude_or_rude(&[]);
    assert!(output.status.success());

    let headlines: Vec<String> = json_documents(&output)
        .iter()
        .map(|doc| doc["headline"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(headlines, crude_or_rude::SAMPLE_HEADLINES);
}

#[test]
fn failed_analysis_exits_with_code_one() {
    let output = crude_or_rude(&["   "]);
    assert_eq!(output.status.code(), Some(1));

    let docs = json_documents(&output);
    assert_eq!(docs.len(), 1);
    assert!(docs[0]["error"].as_str().unwrap().contains("invalid input"));
}
