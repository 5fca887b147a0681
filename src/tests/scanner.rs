use super::{block_title, scan_blocks};
use crate::block::BlockKind;
use crate::formats::profile::ProfileFormat;

#[test]
fn test_block_boundaries() {
    let lines = [
        "header line",
        "#绘图比例 1 500 100",
        "#断链 2",
        "K0+000 K0+100",
        "more",
        "#数模 old",
    ];
    let blocks = scan_blocks(&lines, &ProfileFormat);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].title, "绘图比例");
    assert_eq!((blocks[0].line_start, blocks[0].line_end), (2, 2));
    assert_eq!(blocks[1].kind, BlockKind::Disconnection);
    assert_eq!((blocks[1].line_start, blocks[1].line_end), (3, 5));
    assert_eq!((blocks[2].line_start, blocks[2].line_end), (6, 6));
}

#[test]
fn test_indented_title_and_trailing_words() {
    assert_eq!(block_title("   #  模型管理 a b\n", &ProfileFormat), Some("模型管理"));
    assert_eq!(block_title("plain text", &ProfileFormat), None);
}

#[test]
fn test_bare_marker_starts_no_block() {
    let lines = ["#", "#A 1", "#   ", "2", "#B"];
    let blocks = scan_blocks(&lines, &ProfileFormat);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].title, "A");
    assert_eq!((blocks[0].line_start, blocks[0].line_end), (2, 4));
    assert_eq!((blocks[1].line_start, blocks[1].line_end), (5, 5));
}

#[test]
fn test_no_titles_yields_no_blocks() {
    let lines = ["just", "content // here"];
    assert!(scan_blocks(&lines, &ProfileFormat).is_empty());
    assert!(scan_blocks::<&str>(&[], &ProfileFormat).is_empty());
}

#[test]
fn test_blocks_cover_every_line_after_first_title() {
    let lines = ["pre", "#A", "x", "#B", "y", "z", "#C"];
    let blocks = scan_blocks(&lines, &ProfileFormat);

    let covered: usize = blocks.iter().map(crate::block::Block::len).sum();
    assert_eq!(covered, lines.len() - 1);
    for pair in blocks.windows(2) {
        assert_eq!(pair[0].line_end + 1, pair[1].line_start);
    }
    assert_eq!(blocks.last().map(|b| b.line_end), Some(lines.len()));
}
