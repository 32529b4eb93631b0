use jsonex::{extract, limits, ExtractError, Extractor, Rule, StrSlot};
use proptest::prelude::*;

fn str_slot(s: &str) -> StrSlot {
    StrSlot::try_from(s.as_bytes()).unwrap()
}

#[test]
fn test_nested_object() {
    let mut a_b = 0;
    let mut a_c = StrSlot::new();
    let mut rules = [
        Rule::integer(&mut a_b, &["a", "b"]),
        Rule::string(&mut a_c, &["a", "c"]),
    ];

    extract(br#"{"a":{"b":42,"c":"hello there"}}"#, &mut rules).unwrap();
    assert!(rules.iter().all(Rule::found));

    drop(rules);
    assert_eq!(42, a_b);
    assert_eq!(b"hello there", a_c.as_slice());
}

#[test]
fn test_array_without_rules() {
    assert_eq!(Ok(()), extract(b"[1,2,true,false,null,4]", &mut []));
}

#[test]
fn test_unterminated() {
    let mut x = 0;
    let mut rules = [Rule::integer(&mut x, &["x"])];
    let err = extract(br#"{"x":1"#, &mut rules).unwrap_err();
    assert!(matches!(err, ExtractError::Rejected(_)));
}

#[test]
fn test_leading_zero() {
    let err = extract(br#"{"a":01}"#, &mut []).unwrap_err();
    assert!(matches!(err, ExtractError::Rejected(_)));
}

#[test]
fn test_surrounding_whitespace() {
    let mut p = 0;
    let mut rules = [Rule::integer(&mut p, &["p"])];
    extract(br#" { "p":3 } "#, &mut rules).unwrap();
    assert!(rules[0].found());

    drop(rules);
    assert_eq!(3, p);
}

#[test]
fn test_nested_paths() {
    let input = br#"{
        "bloop": 42,
        "blah": {"snarf": 1234, "wharrgbl": "mem dog", "list": [1, {"deep": true}]},
        "pooh": 4
    }"#;

    let mut bloop = 0;
    let mut snarf = 0;
    let mut wharrgbl = StrSlot::new();
    let mut pooh = 0;
    let mut missing = 0;
    let mut rules = [
        Rule::integer(&mut bloop, &["bloop"]),
        Rule::integer(&mut snarf, &["blah", "snarf"]),
        Rule::string(&mut wharrgbl, &["blah", "wharrgbl"]),
        Rule::integer(&mut pooh, &["pooh"]),
        Rule::integer(&mut missing, &["blah"]),
    ];

    extract(input, &mut rules).unwrap();
    let found: Vec<bool> = rules.iter().map(Rule::found).collect();
    assert_eq!(vec![true, true, true, true, false], found);

    drop(rules);
    assert_eq!(42, bloop);
    assert_eq!(1234, snarf);
    assert_eq!(str_slot("mem dog"), wharrgbl);
    assert_eq!(4, pooh);
    assert_eq!(0, missing);
}

#[test]
fn test_exact_path_length() {
    let mut short = 0;
    let mut long = 0;
    let mut rules = [
        Rule::integer(&mut short, &["a"]),
        Rule::integer(&mut long, &["a", "b", "c"]),
    ];
    extract(br#"{"a":{"b":5}}"#, &mut rules).unwrap();
    assert!(!rules[0].found());
    assert!(!rules[1].found());
}

#[test]
fn test_type_must_match() {
    let mut s = StrSlot::new();
    let mut b = false;
    let mut rules = [Rule::string(&mut s, &["n"]), Rule::boolean(&mut b, &["n"])];
    extract(br#"{"n": 12}"#, &mut rules).unwrap();
    assert!(!rules[0].found());
    assert!(!rules[1].found());
}

#[test]
fn test_booleans() {
    let mut t = false;
    let mut f = true;
    let mut rules = [Rule::boolean(&mut t, &["t"]), Rule::boolean(&mut f, &["f"])];
    extract(br#"{"t": true, "f": false, "n": null}"#, &mut rules).unwrap();
    assert!(rules[0].found() && rules[1].found());

    drop(rules);
    assert!(t);
    assert!(!f);
}

#[test]
fn test_negative_numbers() {
    let mut i = 0;
    let mut x = 0.0;
    let mut y = 0.0;
    let mut rules = [
        Rule::integer(&mut i, &["i"]),
        Rule::float(&mut x, &["x"]),
        Rule::float(&mut y, &["y"]),
    ];
    extract(br#"{"i": -5, "x": -1.5, "y": 2.5}"#, &mut rules).unwrap();

    drop(rules);
    assert_eq!(-5, i);
    assert_eq!(-1.5, x);
    assert_eq!(2.5, y);
}

#[test]
fn test_integer_slot_truncates_fraction() {
    let mut i = 0;
    let mut rules = [Rule::integer(&mut i, &["v"])];
    extract(br#"{"v": 3.99}"#, &mut rules).unwrap();

    drop(rules);
    assert_eq!(3, i);
}

#[test]
fn test_first_match_only() {
    let mut first = 0;
    let mut second = 0;
    let mut rules = [
        Rule::integer(&mut first, &["k"]),
        Rule::integer(&mut second, &["k"]),
    ];
    extract(br#"{"k": 7}"#, &mut rules).unwrap();
    assert!(rules[0].found());
    assert!(!rules[1].found());

    drop(rules);
    assert_eq!(7, first);
    assert_eq!(0, second);
}

#[test]
fn test_array_elements_have_no_path() {
    // array 不占 path ，所以数组里 object 的 key 直接接在外层 key 后面
    let mut id = 0;
    let mut rules = [Rule::integer(&mut id, &["items", "id"])];
    extract(br#"{"items": [{"id": 1}, {"id": 2}]}"#, &mut rules).unwrap();
    assert!(rules[0].found());

    drop(rules);
    assert_eq!(2, id);
}

#[test]
fn test_escapes_are_raw_bytes() {
    let mut s = StrSlot::new();
    let mut rules = [Rule::string(&mut s, &["s"])];
    extract(br#"{"s": "a\nb"}"#, &mut rules).unwrap();

    drop(rules);
    assert_eq!(br"a\nb", s.as_slice());
}

#[test]
fn test_reset_is_independent() {
    let mut first = 0;
    let mut rules = [Rule::integer(&mut first, &["v"])];
    let mut second = 0;
    let mut other_rules = [Rule::integer(&mut second, &["w"])];

    let mut extractor = Extractor::new(&mut rules);
    extractor.feed_slice(br#"{"v": [1"#).unwrap();
    assert!(extractor.feed(b'}').is_err());

    extractor.reset(&mut other_rules);
    extractor.feed_slice(br#"{"v": 8, "w": 9}"#).unwrap();
    extractor.finish().unwrap();
    assert!(extractor.rules()[0].found());

    drop(extractor);
    assert!(!rules[0].found());
    drop(rules);
    drop(other_rules);
    assert_eq!(0, first);
    assert_eq!(9, second);
}

#[test]
fn test_rules_found_cleared_on_init() {
    let mut v = 0;
    let mut rules = [Rule::integer(&mut v, &["v"])];
    extract(br#"{"v": 1}"#, &mut rules).unwrap();
    assert!(rules[0].found());

    extract(br#"{"w": 1}"#, &mut rules).unwrap();
    assert!(!rules[0].found());
}

fn nested_arrays(levels: usize) -> Vec<u8> {
    let mut doc = vec![b'['; levels];
    doc.push(b'1');
    doc.extend(std::iter::repeat(b']').take(levels));
    doc
}

#[test]
fn test_depth_boundary() {
    // 根 value 之外，每层 array 占 value + array 两个 frame ，最里面的数字占 value + number 两个
    let levels = (limits::DEFAULT_DEPTH_LIMIT - 2) / 2;
    assert_eq!(Ok(()), extract(&nested_arrays(levels), &mut []));
    assert_eq!(
        Err(ExtractError::DepthExceeded(limits::DEFAULT_DEPTH_LIMIT)),
        extract(&nested_arrays(levels + 1), &mut [])
    );
}

#[test]
fn test_small_depth_objects() {
    let mut v = 0;
    let mut rules = [Rule::integer(&mut v, &["a", "b"])];
    let mut extractor: Extractor<'_, '_, 6> = Extractor::with_depth(&mut rules);
    // value, object, value, object, value, number
    extractor.feed_slice(br#"{"a":{"b":1}}"#).unwrap();
    extractor.finish().unwrap();
    drop(extractor);

    let mut extractor: Extractor<'_, '_, 6> = Extractor::with_depth(&mut rules);
    assert_eq!(
        Err(ExtractError::DepthExceeded(6)),
        extractor.feed_slice(br#"{"a":{"b":{"c":1}}}"#)
    );
}

#[test]
fn test_string_boundary() {
    let exact = "x".repeat(limits::MAX_STRING_SIZE);
    let mut s = StrSlot::new();
    let mut rules = [Rule::string(&mut s, &["s"])];
    let doc = format!(r#"{{"s": "{exact}"}}"#);
    extract(doc.as_bytes(), &mut rules).unwrap();
    drop(rules);
    assert_eq!(exact.as_bytes(), s.as_slice());

    let doc = format!(r#"{{"s": "{exact}y"}}"#);
    let err = extract(doc.as_bytes(), &mut []).unwrap_err();
    assert!(matches!(err, ExtractError::StringTooLong(_)));
    assert!(!err.is_internal());

    // key 也受同样的限制
    let doc = format!(r#"{{"{exact}y": 1}}"#);
    let err = extract(doc.as_bytes(), &mut []).unwrap_err();
    assert!(matches!(err, ExtractError::StringTooLong(_)));
}

proptest! {
    #[test]
    fn prop_integer_round_trip(value in any::<i64>().prop_filter("magnitude fits", |v| *v != i64::MIN)) {
        let doc = format!(r#"{{"outer": {{"n": {value}}}}}"#);
        let mut n = 0;
        let mut rules = [Rule::integer(&mut n, &["outer", "n"])];
        prop_assert_eq!(Ok(()), extract(doc.as_bytes(), &mut rules));
        prop_assert!(rules[0].found());
        drop(rules);
        prop_assert_eq!(value, n);
    }

    #[test]
    fn prop_string_round_trip(value in "[a-zA-Z0-9 _.:,{}\\[\\]-]{0,64}") {
        let doc = format!(r#"{{"k": ["skip", {{"s": "{value}"}}]}}"#);
        let mut s = StrSlot::new();
        let mut rules = [Rule::string(&mut s, &["k", "s"])];
        prop_assert_eq!(Ok(()), extract(doc.as_bytes(), &mut rules));
        prop_assert!(rules[0].found());
        drop(rules);
        prop_assert_eq!(value.as_bytes(), s.as_slice());
    }

    #[test]
    fn prop_bool_round_trip(value in any::<bool>(), pad in "[ \t\r\n]{0,4}") {
        let doc = format!(r#"{pad}{{{pad}"b"{pad}:{pad}{value}{pad}}}{pad}"#);
        let mut b = !value;
        let mut rules = [Rule::boolean(&mut b, &["b"])];
        prop_assert_eq!(Ok(()), extract(doc.as_bytes(), &mut rules));
        drop(rules);
        prop_assert_eq!(value, b);
    }

    #[test]
    fn prop_truncated_documents_fail(cut in 0usize..40) {
        let doc: &[u8] = br#"{"a": [1, -2.5, "x", true], "b": {"c": null}}"#;
        prop_assume!(cut < doc.len());
        let err = extract(&doc[..cut], &mut []).unwrap_err();
        prop_assert!(!err.is_internal());
    }
}
