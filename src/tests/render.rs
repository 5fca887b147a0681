use super::{comment_out, render_block};
use crate::block::{Block, BlockKind};
use crate::formats::profile::ProfileFormat;
use crate::tokens::Tokens;

fn block(title: &str) -> Block {
    Block {
        title: title.to_string(),
        kind: BlockKind::from_title(title),
        line_start: 1,
        line_end: 1,
    }
}

fn numbered(n: usize) -> Tokens {
    Tokens::new((0..n).map(|i| i.to_string()).collect())
}

#[test]
fn test_plain_block_single_line() {
    let lines = render_block(&block("绘图比例"), &numbered(3), &ProfileFormat);
    assert_eq!(lines, ["#绘图比例 0 1 2"]);
}

#[test]
fn test_plain_block_without_tokens() {
    let lines = render_block(&block("数模"), &Tokens::default(), &ProfileFormat);
    assert_eq!(lines, ["#数模"]);
}

#[test]
fn test_disconnection_wraps_seven_per_line() {
    let lines = render_block(&block("断链"), &numbered(23), &ProfileFormat);

    assert_eq!(lines.len(), 1 + 4);
    assert_eq!(lines[0], "#断链 0");
    assert_eq!(lines[1], "1 2 3 4 5 6 7");
    assert_eq!(lines[2], "8 9 10 11 12 13 14");
    assert_eq!(lines[3], "15 16 17 18 19 20 21");
    assert_eq!(lines[4], "22");
}

#[test]
fn test_disconnection_keeps_empty_tokens_in_groups() {
    let tokens = Tokens::new(vec!["1".into(), String::new(), "b".into()]);
    let lines = render_block(&block("断链"), &tokens, &ProfileFormat);
    assert_eq!(lines, ["#断链 1", " b"]);
}

#[test]
fn test_disconnection_without_tokens() {
    let lines = render_block(&block("断链"), &Tokens::default(), &ProfileFormat);
    assert_eq!(lines, ["#断链"]);
}

#[test]
fn test_model_management_two_lines() {
    let lines = render_block(&block("模型管理"), &numbered(6), &ProfileFormat);
    assert_eq!(lines, ["#模型管理", "0 1 2 3 4 5"]);
}

#[test]
fn test_comment_out_keeps_text() {
    let lines = ["#地面线 3\r\n", "  1 2 3\n", "last"];
    assert_eq!(
        comment_out(&lines, &ProfileFormat),
        ["//#地面线 3", "//  1 2 3", "//last"]
    );
}
