// Runs the generated scanners over the files in tests/data and compares the token streams.
// The scanner is chosen by the part of the file name in front of the first underscore.
// Run with `cargo test -p scanpile_demos --test e2e_test`

use std::fs;

use regex::Regex;
use scanpile_demos::{backtracking, comments, keywords};

fn scan(grammar: &str, input: &str) -> Vec<String> {
    match grammar {
        "backtracking" => backtracking::scanner(input)
            .tokens()
            .map(|t| t.to_string())
            .collect(),
        "comments" => comments::scanner(input)
            .tokens()
            .map(|t| t.to_string())
            .collect(),
        "keywords" => keywords::scanner(input)
            .tokens()
            .map(|t| t.to_string())
            .collect(),
        _ => panic!("No scanner for grammar {}", grammar),
    }
}

#[test]
fn e2e_test() {
    // Initialize the logger
    let _ = env_logger::builder().is_test(true).try_init();

    // Initialize the regex for newlines. It is used to make the tests platform independent.
    let rx_newline: Regex = Regex::new(r"\r?\n|\r").unwrap();

    let mut count = 0;
    for entry in fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.extension().unwrap() != "input" {
            continue;
        }

        println!("--------------------------------------------------");
        println!("Entry: {:?}", entry.file_name());
        println!("--------------------------------------------------");

        let file_stem = path.file_stem().unwrap().to_string_lossy().to_string();
        let grammar = file_stem.split('_').next().unwrap();

        let input = fs::read_to_string(&path).unwrap();
        let input = rx_newline.replace_all(&input, "\n");
        let tokens = scan(grammar, &input);
        for token in &tokens {
            println!("{}", token);
        }

        // The expected tokens are in a file with the same base name and a .tokens extension.
        let expected = fs::read_to_string(path.with_extension("tokens")).unwrap();
        let expected: Vec<&str> = expected.lines().collect();
        assert_eq!(tokens, expected, "Token mismatch for {}", path.display());
        count += 1;
    }
    assert!(count > 0, "No test data found");
}
