extern crate quickcheck;
extern crate stree;

use quickcheck::{quickcheck, QuickCheck, TestResult};
use stree::{Error, SuffixArray};

fn ukkonen(text: &str) -> SuffixArray {
    SuffixArray::new(text).unwrap()
}

fn naive(text: &str) -> SuffixArray {
    SuffixArray::new_naive(text).unwrap()
}

// Map arbitrary bytes into the content alphabet, '%' through '~'.
fn printable(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| (b'%' + b % 90) as char).collect()
}

// A three letter alphabet makes repeats and deep splits common.
fn letters(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| (b'a' + b % 3) as char).collect()
}

// These tests assume the correctness of the `naive` method of computing a
// suffix array. (It's only a couple lines of code and probably difficult to
// get wrong.)

#[test]
fn basic1() {
    assert_eq!(naive("apple"), ukkonen("apple"));
}

#[test]
fn basic2() {
    assert_eq!(naive("banana"), ukkonen("banana"));
}

#[test]
fn basic3() {
    assert_eq!(naive("mississippi"), ukkonen("mississippi"));
}

#[test]
fn basic4() {
    assert_eq!(naive("tgtgtgtgcaccg"), ukkonen("tgtgtgtgcaccg"));
}

#[test]
fn banana_table() {
    assert_eq!(ukkonen("banana").table(), &[6, 5, 3, 1, 0, 4, 2]);
}

#[test]
fn empty_is_ok() {
    assert_eq!(ukkonen("").table(), &[0]);
}

#[test]
fn one_is_ok() {
    assert_eq!(ukkonen("a").table(), &[1, 0]);
}

#[test]
fn two_diff_is_ok() {
    assert_eq!(naive("ab"), ukkonen("ab"));
}

#[test]
fn two_same_is_ok() {
    assert_eq!(naive("aa"), ukkonen("aa"));
}

#[test]
fn runs_are_ok() {
    assert_eq!(ukkonen("aaaa").table(), &[4, 3, 2, 1, 0]);
}

#[test]
fn palindrome_is_ok() {
    assert_eq!(naive("abacaba"), ukkonen("abacaba"));
}

#[test]
fn idempotent() {
    for text in &["", "a", "banana", "mississippi", "aaaa"] {
        assert_eq!(ukkonen(text).table(), ukkonen(text).table());
    }
}

#[test]
fn qc_naive_equals_ukkonen() {
    fn prop(bytes: Vec<u8>) -> TestResult {
        let s = printable(&bytes);
        let expected = naive(&s);
        let got = ukkonen(&s);
        TestResult::from_bool(expected == got)
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(50000)
        .quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn qc_naive_equals_ukkonen_small_alphabet() {
    fn prop(bytes: Vec<u8>) -> TestResult {
        let s = letters(&bytes);
        let expected = naive(&s);
        let got = ukkonen(&s);
        TestResult::from_bool(expected == got)
    }
    QuickCheck::new()
        .tests(1000)
        .max_tests(50000)
        .quickcheck(prop as fn(Vec<u8>) -> TestResult);
}

#[test]
fn qc_table_is_permutation() {
    fn prop(bytes: Vec<u8>) -> bool {
        let s = letters(&bytes);
        let sa = ukkonen(&s);
        let mut table = sa.table().to_vec();
        table.sort();
        table == (0..s.len() as u32 + 1).collect::<Vec<u32>>()
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn qc_suffixes_ascend() {
    fn prop(bytes: Vec<u8>) -> bool {
        let sa = ukkonen(&printable(&bytes));
        (1..sa.len()).all(|i| sa.suffix(i - 1) < sa.suffix(i))
    }
    quickcheck(prop as fn(Vec<u8>) -> bool);
}

// Do some testing on substring search.

#[test]
fn empty_find_empty() {
    let sa = ukkonen("");
    assert_eq!(sa.positions(""), &[] as &[u32]);
    assert!(!sa.contains(""));
}

#[test]
fn one_find_one_notexists() {
    let sa = ukkonen("a");
    assert_eq!(sa.positions("b"), &[] as &[u32]);
    assert!(!sa.contains("b"));
}

#[test]
fn one_find_one_exists() {
    let sa = ukkonen("a");
    assert_eq!(sa.positions("a"), &[0]);
    assert!(sa.contains("a"));
}

#[test]
fn two_find_one_exists() {
    let sa = ukkonen("ab");
    assert_eq!(sa.positions("b"), &[1]);
    assert!(sa.contains("b"));
}

#[test]
fn two_find_two_exists() {
    let sa = ukkonen("aa");
    assert_eq!(sa.positions("a"), &[1, 0]);
    assert!(sa.contains("a"));
}

#[test]
fn many_exists() {
    let sa = ukkonen("zzzzzaazzzzz");
    assert_eq!(sa.positions("a"), &[5, 6]);
    assert!(sa.contains("a"));
}

#[test]
fn many_exists_long() {
    let sa = ukkonen("zzzzabczzzzzabczzzzzz");
    assert_eq!(sa.positions("abc"), &[4, 12]);
    assert!(sa.contains("abc"));
}

#[test]
fn query_longer() {
    let sa = ukkonen("az");
    assert_eq!(sa.positions("mnomnomnomnomnomnomno"), &[] as &[u32]);
    assert!(!sa.contains("mnomnomnomnomnomnomno"));
}

#[test]
fn query_words() {
    let sa = ukkonen("The_quick_brown_fox_was_very_quick.");
    assert_eq!(sa.positions("quick"), &[29, 4]);
}

// Inputs outside the content alphabet are rejected up front.

#[test]
fn rejects_space() {
    assert_eq!(SuffixArray::new("a b").err(),
               Some(Error::OutOfAlphabet { ch: ' ', position: 1 }));
}

#[test]
fn rejects_newline() {
    assert_eq!(SuffixArray::new("ab\n").err(),
               Some(Error::OutOfAlphabet { ch: '\n', position: 2 }));
}

#[test]
fn rejects_terminator() {
    assert_eq!(SuffixArray::new("$5.00").err(),
               Some(Error::Terminator { position: 0 }));
}

#[test]
fn rejects_unicode_snowman() {
    assert_eq!(SuffixArray::new("☃abc☃").err(),
               Some(Error::OutOfAlphabet { ch: '☃', position: 0 }));
}
