use super::*;

#[test]
fn parses_every_form() {
    assert_eq!("add:3".parse::<GridOp>().unwrap(), GridOp::AddLocal(3));
    assert_eq!("swap:0:24".parse::<GridOp>().unwrap(), GridOp::Swap(0, 24));
    assert_eq!("remove: 7".parse::<GridOp>().unwrap(), GridOp::Remove(7));
    assert_eq!(
        "url:https://cdn.example/a.jpg?w=1".parse::<GridOp>().unwrap(),
        GridOp::AddUrl("https://cdn.example/a.jpg?w=1".to_string())
    );
}

#[test]
fn display_matches_parse_form() {
    for raw in ["add:1", "swap:2:3", "remove:0", "url:http://x.example/y.png"] {
        assert_eq!(raw.parse::<GridOp>().unwrap().to_string(), raw);
    }
}

#[test]
fn rejects_malformed_ops() {
    for raw in ["", "add", "add:x", "swap:1", "swap:a:b", "url:", "move:1:2", "remove:-1"] {
        assert!(
            matches!(raw.parse::<GridOp>(), Err(WrapError::Validation(_))),
            "{raw} should not parse"
        );
    }
}
