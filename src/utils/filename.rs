use std::path::Path;

/// Weather file name for a municipality: `{COD_INE}_{NOMBRE_ACTUAL}.csv`
///
/// Slashes in bilingual names ("Alicante/Alacant") become `__` so the
/// result is a single path component.
pub fn default_tmy_filename(cod_ine: &str, name: &str) -> String {
    format!("{}_{}.csv", cod_ine, name.replace('/', "__"))
}

pub fn is_parquet_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"))
}
