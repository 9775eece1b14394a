//! Property-based testing utilities using proptest.

use proptest::prelude::*;

/// Titles a user might type, including markup-significant characters,
/// quotes and non-ASCII text.
pub fn arb_title() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,40}",
        "[<>&\"' a-z/]{1,20}",
        "\\PC{0,30}",
    ]
}

/// Form values for `id` that cannot name an item: text, fractions and
/// numbers with trailing garbage.
pub fn arb_non_numeric_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z]{1,10}",
        "[0-9]{1,5}\\.[0-9]{0,2}[1-9]",
        "[0-9]{1,5}[a-z]{1,3}",
        Just("1e-3".to_string()),
    ]
}

/// Numeric spellings of an integral id that are not plain integer text,
/// paired with the id they name.
pub fn arb_integral_id_spelling() -> impl Strategy<Value = (i64, String)> {
    (1i64..500).prop_flat_map(|id| {
        prop_oneof![
            Just((id, format!("{id}.0"))),
            Just((id, format!("{id}e0"))),
            Just((id, format!("+{id}"))),
            Just((id, format!("0{id}"))),
            Just((id, format!(" {id}.00 "))),
        ]
    })
}
