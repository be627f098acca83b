use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TranslationRow {
    pub id: i64,
    pub english_name: String,
    pub localized_name: String,
    pub platform_scope: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AliasRow {
    pub id: i64,
    pub alias: String,
    pub english_name: String,
    pub normalized_alias: String,
}
