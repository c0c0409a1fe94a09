use crate::error::Result;
use crate::models::Municipality;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Reader for the formatted municipality registry (`Municipios.csv`)
pub struct MunicipalityReader {
    delimiter: u8,
}

impl MunicipalityReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read every municipality in file order
    pub fn read_municipalities(&self, path: &Path) -> Result<Vec<Municipality>> {
        let bytes = fs::read(path)?;
        let content = decode(&bytes);
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Vec<Municipality>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut municipalities = Vec::new();
        for result in reader.deserialize::<Municipality>() {
            let municipality = result?;
            municipality.validate()?;
            municipalities.push(municipality);
        }

        Ok(municipalities)
    }
}

impl Default for MunicipalityReader {
    fn default() -> Self {
        Self::new()
    }
}

/// UTF-8 as is; anything else is taken as Latin-1 (the IGN registry encoding)
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Err(_) => {
            debug!("Registry is not UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "COD_INE,COD_PROV,PROVINCIA,NOMBRE_ACTUAL,LONGITUD_ETRS89,LATITUD_ETRS89,ALTITUD,ARCHIVO_TMY";

    #[test]
    fn test_parse_registry_preserves_leading_zeros() -> Result<()> {
        let content = format!(
            "{}\n01001,01,Araba/Álava,Alegría-Dulantzi,-2.513,42.841,561.6,01001_Alegría-Dulantzi.csv\n\
             03014,03,Alicante/Alacant,Alicante/Alacant,-0.481,38.345,7.0,\n",
            HEADER
        );

        let municipalities = MunicipalityReader::new().parse(&content)?;

        assert_eq!(municipalities.len(), 2);
        assert_eq!(municipalities[0].cod_ine, "01001");
        assert_eq!(municipalities[0].cod_prov, "01");
        assert_eq!(municipalities[0].province, "Araba/Álava");
        assert_eq!(municipalities[0].altitude, 561.6);
        assert_eq!(municipalities[1].tmy_filename(), "03014_Alicante__Alacant.csv");

        Ok(())
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let content = format!(
            "{}\n28079,28,Madrid,Madrid,-3.703,140.409,657.0,28079_Madrid.csv\n",
            HEADER
        );

        assert!(matches!(
            MunicipalityReader::new().parse(&content),
            Err(ProcessingError::Validation(_))
        ));
    }

    #[test]
    fn test_latin1_registry_is_decoded() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        // "Cádiz" with á encoded as 0xE1
        temp_file.write_all(b"11012,11,C\xe1diz,C\xe1diz,-6.288,36.529,11.0,\n")?;

        let reader = MunicipalityReader::new();
        let municipalities = reader.read_municipalities(temp_file.path())?;

        assert_eq!(municipalities[0].province, "Cádiz");
        assert_eq!(municipalities[0].name, "Cádiz");

        Ok(())
    }

    #[test]
    fn test_semicolon_delimiter() -> Result<()> {
        let content = format!(
            "{}\n28079;28;Madrid;Madrid;-3.703;40.409;657.0;\n",
            HEADER.replace(',', ";")
        );

        let municipalities = MunicipalityReader::with_delimiter(b';').parse(&content)?;
        assert_eq!(municipalities[0].latitude, 40.409);

        Ok(())
    }
}
