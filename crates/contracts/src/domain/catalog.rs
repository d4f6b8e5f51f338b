//! Catalogue of the CRUD collections exposed by the backend.
//!
//! Each screen of the console that shows a plain table is described here: the
//! REST collection it reads and the columns it displays.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    /// Amount in FCFA
    Money,
    Quantity,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
    pub format: CellFormat,
}

const fn col(field: &'static str, label: &'static str, format: CellFormat) -> Column {
    Column {
        field,
        label,
        format,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub title: &'static str,
    /// Collection path, e.g. `/products`
    pub endpoint: &'static str,
    pub columns: &'static [Column],
    pub deletable: bool,
}

impl ResourceDescriptor {
    pub fn item_endpoint(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }
}

use CellFormat::*;

pub const CLIENTS: ResourceDescriptor = ResourceDescriptor {
    title: "Clients",
    endpoint: "/clients",
    columns: &[
        col("name", "Nom", Text),
        col("phone", "Téléphone", Text),
        col("address", "Adresse", Text),
        col("balance", "Solde", Money),
    ],
    deletable: true,
};

pub const PRODUCTS: ResourceDescriptor = ResourceDescriptor {
    title: "Produits",
    endpoint: "/products",
    columns: &[
        col("name", "Désignation", Text),
        col("category", "Catégorie", Text),
        col("unit", "Unité", Text),
        col("price", "Prix de vente", Money),
    ],
    deletable: true,
};

pub const SUPPLIERS: ResourceDescriptor = ResourceDescriptor {
    title: "Fournisseurs",
    endpoint: "/suppliers",
    columns: &[
        col("name", "Nom", Text),
        col("phone", "Téléphone", Text),
        col("balance", "Solde dû", Money),
    ],
    deletable: true,
};

pub const SALES_POINTS: ResourceDescriptor = ResourceDescriptor {
    title: "Points de vente",
    endpoint: "/salesPoints",
    columns: &[
        col("name", "Nom", Text),
        col("address", "Adresse", Text),
        col("manager", "Responsable", Text),
        col("cartons", "Cartons en stock", Quantity),
    ],
    deletable: false,
};

pub const STORES: ResourceDescriptor = ResourceDescriptor {
    title: "Dépôts",
    endpoint: "/stores",
    columns: &[
        col("name", "Nom", Text),
        col("address", "Adresse", Text),
        col("cartons", "Cartons", Quantity),
    ],
    deletable: true,
};

pub const EXPENSES: ResourceDescriptor = ResourceDescriptor {
    title: "Dépenses",
    endpoint: "/expenses",
    columns: &[
        col("label", "Libellé", Text),
        col("category", "Catégorie", Text),
        col("amount", "Montant", Money),
        col("date", "Date", DateTime),
    ],
    deletable: true,
};

pub const CAISSE: ResourceDescriptor = ResourceDescriptor {
    title: "Caisse",
    endpoint: "/caisse",
    columns: &[
        col("type", "Opération", Text),
        col("description", "Description", Text),
        col("amount", "Montant", Money),
        col("date", "Date", DateTime),
    ],
    deletable: false,
};

pub const ARCHIVES: ResourceDescriptor = ResourceDescriptor {
    title: "Archives",
    endpoint: "/archives",
    columns: &[
        col("title", "Document", Text),
        col("type", "Type", Text),
        col("createdAt", "Archivé le", DateTime),
    ],
    deletable: true,
};

pub const USERS: ResourceDescriptor = ResourceDescriptor {
    title: "Utilisateurs",
    endpoint: "/users",
    columns: &[
        col("name", "Nom", Text),
        col("username", "Identifiant", Text),
        col("role", "Rôle", Text),
    ],
    deletable: true,
};
