//! Product Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::receptions::records::ReceptionUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Electronics,
    Clothes,
    Shoes,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Electronics,
        ProductCategory::Clothes,
        ProductCategory::Shoes,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Clothes => "clothes",
            ProductCategory::Shoes => "shoes",
        }
    }
}

impl Display for ProductCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct UnknownProductCategory(pub String);

impl FromStr for ProductCategory {
    type Err = UnknownProductCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "electronics" | "электроника" => Ok(ProductCategory::Electronics),
            "clothes" | "одежда" => Ok(ProductCategory::Clothes),
            "shoes" | "обувь" => Ok(ProductCategory::Shoes),
            other => Err(UnknownProductCategory(other.to_string())),
        }
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub reception_uuid: ReceptionUuid,
    pub category: ProductCategory,
    pub added_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_english_and_russian_names() {
        for category in ProductCategory::ALL {
            assert_eq!(category.as_str().parse(), Ok(category));
        }

        assert_eq!("обувь".parse(), Ok(ProductCategory::Shoes));
        assert_eq!("электроника".parse(), Ok(ProductCategory::Electronics));
    }

    #[test]
    fn rejects_unknown_and_empty_categories() {
        assert!("invalid".parse::<ProductCategory>().is_err());
        assert!("".parse::<ProductCategory>().is_err());
    }
}
