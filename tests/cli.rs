use std::io::Write;
use std::process::{Command, Output};

fn knn_vote(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_knn-vote"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to launch knn-vote")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn sample_dataset_prints_prediction() {
    let output = knn_vote(&["--dataset", "data/dataset.csv"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Prediction for new data point: Iris-setosa\n");
}

#[test]
fn missing_dataset_exits_with_1() {
    let output = knn_vote(&["--dataset", "no/such/dataset.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("failed to load dataset").count(), 1, "stderr: {}", stderr);
}

#[test]
fn invalid_input_exits_with_2() {
    let output = knn_vote(&["--dataset", "data/dataset.csv", "-k", "-1"]);
    assert_eq!(output.status.code(), Some(2));

    let output = knn_vote(&["--dataset", "data/dataset.csv", "--query=-1,2"]);
    assert_eq!(output.status.code(), Some(2));

    let output = knn_vote(&["--dataset", "data/dataset.csv", "--query", "1,x"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"datasetPath": "data/dataset.csv", "queryPoint": [6.6, 3.0, 5.8, 2.1], "k": 5}}"#
    )
    .unwrap();
    file.flush().unwrap();
    let config = file.path().to_str().unwrap();

    let output = knn_vote(&["--config", config]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Prediction for new data point: Iris-virginica\n");

    // The flag query wins over the file's.
    let output = knn_vote(&["--config", config, "--query", "5.0,3.4,1.5,0.2"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Prediction for new data point: Iris-setosa\n");

    // So does the flag k: 19 exceeds the 18 sample rows.
    let output = knn_vote(&["--config", config, "-k", "19"]);
    assert_eq!(output.status.code(), Some(2));
}
