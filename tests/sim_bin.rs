use std::process::Command;

fn run_sim(args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(args)
        .env("BATTLESHIP_LOG", "off")
        .output()
        .unwrap();
    assert!(output.status.success(), "sim failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_sim_plays_to_a_match_winner() {
    let result = run_sim(&["--seed", "5", "--rounds-to-win", "2"]);
    let winner = result["winner"].as_u64().unwrap();
    assert!(winner <= 1);
    assert_eq!(result["rounds_to_win"], 2);

    let rounds = result["rounds"].as_array().unwrap();
    assert!((2..=3).contains(&rounds.len()));
    let last = rounds.last().unwrap();
    assert_eq!(last["score"][winner as usize], 2);
    for round in rounds {
        assert!(round["shots"].as_u64().unwrap() >= 20);
    }
}

#[test]
fn test_sim_is_reproducible_with_seed() {
    let args = ["--seed", "11", "--rounds-to-win", "1", "--hit-goes-again"];
    assert_eq!(run_sim(&args), run_sim(&args));
}
