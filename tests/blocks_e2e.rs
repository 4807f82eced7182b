use byob::{extract_blocks, Message, Response, ResponseBlock, BLOCK_CLOSE, BLOCK_OPEN};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Card {
    title: String,
    buttons: Vec<String>,
}

fn card() -> Card {
    Card {
        title: "Choose a plan".to_string(),
        buttons: vec!["Free".to_string(), "Pro".to_string()],
    }
}

#[test]
fn typed_payload_survives_text_stream() {
    let block = ResponseBlock::new("card", &card()).unwrap();
    let msg = format!("Here you go: {} Anything else?", block.encode());

    let (blocks, text) = extract_blocks(&msg);
    assert_eq!(text, "Here you go:  Anything else?");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].decode::<Card>().unwrap(), card());
}

#[test]
fn message_starting_with_block_has_no_leading_text() {
    let block = ResponseBlock::new("typing", &500).unwrap();
    let msg = format!("   {}done", block.encode());

    let (blocks, text) = extract_blocks(&msg);
    assert_eq!(blocks, vec![block]);
    assert_eq!(text, "done");
}

#[test]
fn adjacent_blocks_without_prose() {
    let a = ResponseBlock::new("a", &"first").unwrap();
    let b = ResponseBlock::new("b", &"second").unwrap();
    let msg = format!("{}{}", a.encode(), b.encode());

    let (blocks, text) = extract_blocks(&msg);
    assert_eq!(blocks, vec![a, b]);
    assert!(text.is_empty());
}

#[test]
fn malformed_blocks_do_not_abort_extraction() {
    let good = ResponseBlock::new("ok", &1).unwrap();
    let msg = format!(
        "a{BLOCK_OPEN}{{broken{BLOCK_CLOSE}b{}c{BLOCK_OPEN}42{BLOCK_CLOSE}d",
        good.encode()
    );

    let (blocks, text) = extract_blocks(&msg);
    assert_eq!(blocks, vec![good]);
    assert_eq!(text, "ac");
}

#[test]
fn token_layout_is_stable() {
    let token = ResponseBlock::new("quick_replies", &["yes", "no"])
        .unwrap()
        .encode();
    assert!(token.starts_with(BLOCK_OPEN));
    assert!(token.ends_with(BLOCK_CLOSE));
    assert_eq!(
        token,
        r#"!!cblk!!{"t":"quick_replies","d":"[\"yes\",\"no\"]"}!!end!!"#
    );
}

#[test]
fn response_level_extraction() {
    let block = ResponseBlock::new("card", &card()).unwrap().with_position(0);
    let mut response = Response {
        messages: vec![
            Message::new(format!("Pick: {}", block.encode())),
            Message::new("no blocks here"),
        ],
    };

    response.extract_blocks();

    assert_eq!(response.messages[0].text, "Pick: ");
    assert_eq!(response.messages[0].blocks, vec![block]);
    assert_eq!(response.messages[1].text, "no blocks here");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["messages"][0]["blocks"][0]["t"], "card");
    assert_eq!(json["messages"][0]["blocks"][0]["p"], 0);
}
