//! Table declarations
//!
//! Every table is declared once here: column types, nullability, defaults,
//! check constraints and references. Migrations render their DDL from these
//! declarations and the validators in [`crate::models`] share the limits.

use std::fmt::Write as _;

/// Stock assigned to a product created without one.
pub const DEFAULT_STOCK: i32 = 10;

/// Maximum length of any name column, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-generated integer key
    Serial,
    Integer,
    Text,
    /// Fixed-point decimal
    Numeric,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Serial => "SERIAL",
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Numeric => "NUMERIC",
        }
    }
}

/// What happens to a referencing row when its target is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

impl OnDelete {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
        }
    }
}

/// Foreign key target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: OnDelete,
}

/// A single column declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub default: Option<&'static str>,
    pub check: Option<&'static str>,
    pub references: Option<ForeignKey>,
}

impl Column {
    /// A required column with no default, check or reference.
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
            default: None,
            check: None,
            references: None,
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn default(self, value: &'static str) -> Self {
        Self {
            default: Some(value),
            ..self
        }
    }

    pub const fn check(self, expr: &'static str) -> Self {
        Self {
            check: Some(expr),
            ..self
        }
    }

    pub const fn references(self, table: &'static str, on_delete: OnDelete) -> Self {
        Self {
            references: Some(ForeignKey {
                table,
                column: "id",
                on_delete,
            }),
            ..self
        }
    }

    fn to_sql(self) -> String {
        let mut sql = format!("{} {}", self.name, self.ty.as_sql());
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = self.default {
            let _ = write!(sql, " DEFAULT {}", default);
        }
        if let Some(check) = self.check {
            let _ = write!(sql, " CHECK ({})", check);
        }
        if let Some(fk) = self.references {
            let _ = write!(
                sql,
                " REFERENCES {} ({}) ON DELETE {}",
                fk.table,
                fk.column,
                fk.on_delete.as_sql()
            );
        }
        sql
    }
}

/// A table declaration
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub primary_key: &'static [&'static str],
}

impl Table {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Tables this one references, in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.references.map(|fk| fk.table))
    }

    /// Render `CREATE TABLE IF NOT EXISTS` DDL.
    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self.columns.iter().map(|c| c.to_sql()).collect();
        lines.push(format!("PRIMARY KEY ({})", self.primary_key.join(", ")));

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            lines.join(",\n    ")
        )
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {} CASCADE", self.name)
    }
}

pub const CATEGORIES: Table = Table {
    name: "categories",
    columns: &[
        Column::new("id", ColumnType::Serial),
        Column::new("category_name", ColumnType::Text).check("length(btrim(category_name)) > 0"),
    ],
    primary_key: &["id"],
};

pub const PRODUCTS: Table = Table {
    name: "products",
    columns: &[
        Column::new("id", ColumnType::Serial),
        Column::new("product_name", ColumnType::Text).check("length(btrim(product_name)) > 0"),
        Column::new("price", ColumnType::Numeric).check("price >= 0"),
        Column::new("stock", ColumnType::Integer)
            .default("10")
            .check("stock >= 0"),
        Column::new("category_id", ColumnType::Integer)
            .nullable()
            .references("categories", OnDelete::SetNull),
    ],
    primary_key: &["id"],
};

pub const TAGS: Table = Table {
    name: "tags",
    columns: &[
        Column::new("id", ColumnType::Serial),
        Column::new("tag_name", ColumnType::Text).check("length(btrim(tag_name)) > 0"),
    ],
    primary_key: &["id"],
};

pub const PRODUCT_TAGS: Table = Table {
    name: "product_tags",
    columns: &[
        Column::new("product_id", ColumnType::Integer).references("products", OnDelete::Cascade),
        Column::new("tag_id", ColumnType::Integer).references("tags", OnDelete::Cascade),
    ],
    primary_key: &["product_id", "tag_id"],
};

/// All tables in creation order (referenced tables first).
pub const TABLES: [Table; 4] = [CATEGORIES, PRODUCTS, TAGS, PRODUCT_TAGS];
