//! Keyword-based category suggestion over free-text expense notes.

use crate::catalog::CategoryId;

/// Ordered rule table mapping a category id to its trigger keywords.
///
/// Matching walks this table top to bottom and the first category with any
/// keyword contained in the note wins. Keywords overlap across categories
/// ("hotel" appears under both "2" and "12"); table order, not specificity,
/// decides those cases.
const RULES: &[(&str, &[&str])] = &[
    (
        "2",
        &[
            "zomato",
            "swiggy",
            "food",
            "restaurant",
            "hotel",
            "mess",
            "biryani",
            "pizza",
            "burger",
        ],
    ),
    ("3", &["tiffin", "lunch", "breakfast", "dinner"]),
    (
        "4",
        &[
            "dmart",
            "big bazaar",
            "spencer",
            "reliance fresh",
            "grocery",
            "supermarket",
            "vegetables",
            "fruits",
        ],
    ),
    (
        "5",
        &["phonepe", "paytm", "gpay", "amazon pay", "wallet", "upi"],
    ),
    (
        "6",
        &[
            "uber", "ola", "metro", "auto", "bus", "taxi", "cab", "bmtc", "dmrc", "commute",
        ],
    ),
    (
        "7",
        &[
            "jio", "airtel", "vi", "vodafone", "idea", "mobile", "recharge", "data", "internet",
        ],
    ),
    (
        "8",
        &["electricity", "water", "gas", "utility", "power", "bill"],
    ),
    (
        "9",
        &[
            "movie",
            "cinema",
            "netflix",
            "prime",
            "hotstar",
            "entertainment",
            "game",
            "spotify",
        ],
    ),
    (
        "10",
        &[
            "pharmacy", "medicine", "doctor", "hospital", "health", "medical", "apollo",
        ],
    ),
    (
        "11",
        &["amazon", "flipkart", "shopping", "myntra", "clothes", "shoes"],
    ),
    (
        "12",
        &[
            "flight",
            "train",
            "hotel",
            "travel",
            "irctc",
            "makemytrip",
            "goibibo",
        ],
    ),
];

/// Suggest a category for a free-text note, or `None` when the note is empty
/// or nothing matches. Deterministic for a given note.
pub fn suggest_category(note: &str) -> Option<CategoryId> {
    if note.is_empty() {
        return None;
    }

    let lower = note.to_lowercase();

    for (category_id, keywords) in RULES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return Some(CategoryId::from(*category_id));
        }
    }

    None
}
