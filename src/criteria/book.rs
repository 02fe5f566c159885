use serde::{Deserialize, Serialize};

use crate::compile::PredicateBuilder;
use crate::filter::{LongFilter, StringFilter};
use crate::predicate::Expr;

use super::Criteria;

/// Field names of the book record
pub mod fields {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
}

/// Field names of the author relation
pub mod author_fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
}

/// Filters over books and their author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct BookCriteria {
    pub book_id: Option<LongFilter>,
    pub author_id: Option<LongFilter>,
    pub author_name: Option<StringFilter>,
    pub title: Option<StringFilter>,
}

impl Criteria for BookCriteria {
    fn to_predicate(&self) -> Expr {
        PredicateBuilder::new()
            .field(fields::ID, self.book_id.as_ref())
            .field(fields::TITLE, self.title.as_ref())
            .join(fields::AUTHOR, author_fields::ID, self.author_id.as_ref())
            .join(fields::AUTHOR, author_fields::NAME, self.author_name.as_ref())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BaseConditions, TextConditions};

    #[test]
    fn empty_criteria_match_everything() {
        assert_eq!(BookCriteria::default().to_predicate(), Expr::AlwaysTrue);
    }

    #[test]
    fn present_filters_are_combined_in_field_order() {
        let mut author_name = StringFilter::new();
        author_name.set_contains("Jane");
        let mut book_id = LongFilter::new();
        book_id.set_in([1, 2]);

        let criteria = BookCriteria {
            book_id: Some(book_id),
            author_name: Some(author_name),
            ..BookCriteria::default()
        };

        assert_eq!(
            criteria.to_predicate().to_string(),
            "id IN (1, 2) AND LOWER(author.name) LIKE '%jane%'"
        );
    }
}
