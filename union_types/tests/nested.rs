use serde_json::json;
use union_types::{UnionType, unions};

unions! {
    pub mod geometry {
        pub const ORIGIN: (i32, i32) = (0, 0);

        #[union_type(case_field = "kind", tag = "Side")]
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct Either<L, R> {
            pub fn left(value: L) -> Either<L, R>;
            pub fn right(value: R) -> Self;

            pub fn swap(self) -> Either<R, L> {
                self.match_with(Either::right, Either::left)
            }
        }

        pub mod deep {
            use std::iter::Sum;

            #[union_type]
            pub struct Never {}

            #[union_type(shared)]
            #[derive(Clone, PartialEq)]
            pub struct Tree<T> {
                pub fn leaf(value: T) -> Self;
                pub fn node(children: Vec<Self>) -> Self;

                pub fn total(&self) -> T
                where
                    T: Copy + Sum<T>,
                {
                    self.clone().match_with(
                        |value| value,
                        |children| children.iter().map(Tree::total).sum(),
                    )
                }
            }
        }
    }

    #[union_type]
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Control {
        pub fn r#loop(count: u32) -> Self;
        pub fn r#break() -> Self;
        pub fn r#continue() -> Self;
    }

    #[union_type(serde = false)]
    pub struct Token<'a> {
        pub fn word(text: &'a str) -> Token<'a>;
        pub fn end() -> Self;
    }
}

use geometry::deep::{Never, NeverCase, Tree};
use geometry::{Either, Side};

#[test]
fn test_modules_keep_their_items() {
    assert_eq!(geometry::ORIGIN, (0, 0));
    assert_eq!(<Either<u8, u8> as UnionType>::TYPE_NAME, "geometry::Either");
    assert_eq!(<Tree<u8> as UnionType>::TYPE_NAME, "geometry::deep::Tree");
}

#[test]
fn test_generic_union_with_tag_override() {
    let left: Either<i32, String> = Either::left(3);
    assert_eq!(left.case(), Side::Left);
    assert_eq!(format!("{left:?}"), "Left(3)");

    let swapped = left.clone().swap();
    assert_eq!(swapped.case(), Side::Right);
    assert_eq!(swapped, Either::right(3));
    assert_eq!(Side::ALL, [Side::Left, Side::Right]);
}

#[test]
fn test_case_field_override() {
    let value = serde_json::to_value(Either::<i32, bool>::right(true)).unwrap();
    assert_eq!(value, json!({"kind": "Right", "value": true}));

    let back: Either<i32, bool> = serde_json::from_value(json!({"kind": "Left", "value": 9})).unwrap();
    assert_eq!(back, Either::left(9));

    // No default case, so null has no meaning
    let err = serde_json::from_value::<Either<i32, bool>>(json!(null)).unwrap_err();
    assert!(err.to_string().contains("no default case"), "{err}");

    let err = serde_json::from_value::<Either<i32, bool>>(json!({"$case": "Left", "value": 9})).unwrap_err();
    assert!(err.to_string().contains("no case was specified"), "{err}");
}

#[test]
fn test_shared_generic_tree() {
    let tree = Tree::node(vec![Tree::leaf(1), Tree::node(vec![Tree::leaf(2), Tree::leaf(3)])]);
    assert_eq!(tree.total(), 6);
    assert_eq!(format!("{tree:?}"), "Node([Leaf(1), Node([Leaf(2), Leaf(3)])])");

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["$case"], "Node");
    assert_eq!(json["children"][0], json!({"$case": "Leaf", "value": 1}));
    assert_eq!(serde_json::from_value::<Tree<i32>>(json).unwrap(), tree);
}

#[test]
fn test_zero_case_union() {
    assert!(NeverCase::ALL.is_empty());
    assert!("Anything".parse::<NeverCase>().is_err());
    assert!(NeverCase::try_from(0).is_err());
    assert!(serde_json::from_value::<Never>(json!(null)).is_err());
    assert!(serde_json::from_value::<Never>(json!({"$case": "Anything"})).is_err());
}

#[test]
fn test_keyword_case_names() {
    let control = Control::r#loop(3);
    assert_eq!(control.case(), ControlCase::Loop);
    assert_eq!(ControlCase::ALL, [ControlCase::Loop, ControlCase::Break, ControlCase::Continue]);

    // Several nullary cases: none of them becomes the default
    let counted = control.match_with(|count| count, || 0, || 1);
    assert_eq!(counted, 3);
    assert_eq!(Control::r#break().match_with(|_| "loop", || "break", || "continue"), "break");
    assert_eq!(format!("{:?}", Control::r#continue()), "Continue");
    assert_eq!(
        serde_json::to_value(Control::r#loop(2)).unwrap(),
        json!({"$case": "Loop", "count": 2})
    );
}

#[test]
fn test_borrowing_union() {
    let sentence = String::from("hello world");
    let tokens: Vec<Token<'_>> = sentence
        .split(' ')
        .map(Token::word)
        .chain(std::iter::once(Token::default()))
        .collect();

    assert_eq!(tokens.len(), 3);
    assert_eq!(format!("{:?}", tokens[0]), "Word(\"hello\")");
    assert_eq!(tokens[2].case(), TokenCase::End);

    let mut words: Vec<String> = Vec::new();
    for token in &tokens {
        token.do_or(|| {}, None, Some(&mut |text: &&str| words.push(text.to_string())));
    }
    assert_eq!(words, ["hello", "world"]);
}
