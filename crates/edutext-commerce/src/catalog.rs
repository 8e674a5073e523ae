//! Catalog entries as the storefront sees them.

use serde::{Deserialize, Serialize};

use crate::ids::TextbookId;
use crate::money::Money;

/// Academic department a textbook belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// A textbook listed in the campus catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Textbook {
    pub id: TextbookId,
    pub title: String,
    pub course_code: String,
    pub department: Department,
    pub level: String,
    pub price: Money,
    pub description: String,
    pub stock: u32,
    pub image: Option<String>,
    pub is_popular: bool,
    pub is_new: bool,
}

impl Textbook {
    /// Builds a minimal listing. Catalog fields beyond id, title and price
    /// default to empty values and can be filled in afterwards.
    pub fn new(id: impl Into<TextbookId>, title: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            course_code: String::new(),
            department: Department {
                id: 0,
                name: String::new(),
                code: String::new(),
            },
            level: String::new(),
            price,
            description: String::new(),
            stock: 0,
            image: None,
            is_popular: false,
            is_new: false,
        }
    }

    pub fn with_course(mut self, course_code: impl Into<String>, level: impl Into<String>) -> Self {
        self.course_code = course_code.into();
        self.level = level.into();
        self
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = department;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
