//! Static page content: FAQ entries and headings

/// A question shown in the FAQ panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_ITEMS: [FaqItem; 4] = [
    FaqItem {
        question: "How long until I get an answer?",
        answer: "Usually 5 to 10 working days, depending on complexity. Urgent reports are prioritised.",
    },
    FaqItem {
        question: "Can I follow the status of my submission?",
        answer: "Yes. If you leave your e-mail you will receive updates about your case.",
    },
    FaqItem {
        question: "Will my identity be protected?",
        answer: "Absolutely. Anonymous submissions are handled with the same care and confidentiality.",
    },
    FaqItem {
        question: "Who can see the information?",
        answer: "Only authorised members of the association board, following strict privacy rules.",
    },
];

pub const PAGE_TITLE: &str = "Feedback Desk";

pub const PAGE_SUBTITLE: &str =
    "Complaints, suggestions, reports and praise go straight to the association board.";

/// Toggle the expanded FAQ entry: selecting the open one collapses it
pub fn toggle_faq(expanded: Option<usize>, index: usize) -> Option<usize> {
    if expanded == Some(index) || index >= FAQ_ITEMS.len() {
        None
    } else {
        Some(index)
    }
}
