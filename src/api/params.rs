//! Request parameters, checked before anything is sent to the network.

use validator::Validate;

use crate::api::data::{Category, Format};

/// The smallest page the API serves.
pub const MIN_AMOUNT: u32 = 1;
/// The largest page the API serves.
pub const MAX_AMOUNT: u32 = 20;
/// The shortest search query, in characters.
pub const MIN_QUERY_LEN: u64 = 3;
/// The longest search query, in characters.
pub const MAX_QUERY_LEN: u64 = 150;

#[derive(Debug, Validate)]
pub(crate) struct CategoryParams<'a> {
    pub(crate) category: &'a Category,
    // the name is the path of the endpoint, an empty one targets the API root
    #[validate(length(min = 1, message = "category name must not be empty"))]
    pub(crate) name: &'a str,
    #[validate(range(
        min = MIN_AMOUNT,
        max = MAX_AMOUNT,
        message = "amount must be between 1 and 20"
    ))]
    pub(crate) amount: u32,
}

impl<'a> CategoryParams<'a> {
    /// # Errors
    ///
    /// If `amount` is not in the range `1..=20`,
    /// or the name of `category` is empty, this function will return an error.
    pub(crate) fn build(
        category: &'a Category,
        amount: u32,
    ) -> Result<Self, validator::ValidationErrors> {
        let params = Self {
            category,
            name: &category.name,
            amount,
        };
        params.validate()?;
        Ok(params)
    }
}

#[derive(Debug, Validate)]
pub(crate) struct SearchParams<'a> {
    #[validate(length(
        min = MIN_QUERY_LEN,
        max = MAX_QUERY_LEN,
        message = "query must be 3 to 150 characters long"
    ))]
    pub(crate) query: &'a str,
    #[validate(range(
        min = MIN_AMOUNT,
        max = MAX_AMOUNT,
        message = "amount must be between 1 and 20"
    ))]
    pub(crate) amount: u32,
    pub(crate) format: Format,
    pub(crate) category: Option<&'a Category>,
    #[validate(length(min = 1, message = "category name must not be empty"))]
    pub(crate) category_name: Option<&'a str>,
}

impl<'a> SearchParams<'a> {
    /// # Errors
    ///
    /// If `amount` is not in the range `1..=20`, `query` is not 3 to 150 characters long,
    /// or the name of `category` is empty, this function will return an error.
    pub(crate) fn build(
        query: &'a str,
        amount: u32,
        format: Format,
        category: Option<&'a Category>,
    ) -> Result<Self, validator::ValidationErrors> {
        let params = Self {
            query,
            amount,
            format,
            category,
            category_name: category.map(|category| category.name.as_str()),
        };
        params.validate()?;
        Ok(params)
    }
}
