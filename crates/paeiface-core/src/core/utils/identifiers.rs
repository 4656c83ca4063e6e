use phf::{Map, phf_map};

static ONE_LETTER_CODES: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Protonation-state and force-field aliases
    "HSD" => 'H', "HSE" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "CYX" => 'C', "ASH" => 'D', "GLH" => 'E', "LYN" => 'K',
    // Common modified residues
    "MSE" => 'M', "SEP" => 'S', "TPO" => 'T', "PTR" => 'Y', "CSO" => 'C',
    "SEC" => 'U', "PYL" => 'O',
};

/// Maps a three-letter residue name to its single-letter amino-acid code.
///
/// Lookup is case-insensitive and ignores surrounding whitespace. Unknown or
/// non-standard names map to `'X'`.
pub fn one_letter_code(residue_name: &str) -> char {
    let key = residue_name.trim().to_ascii_uppercase();
    ONE_LETTER_CODES.get(key.as_str()).copied().unwrap_or('X')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_letter_code_recognizes_the_twenty_standard_residues() {
        let names = [
            "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "LEU", "LYS",
            "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
        ];
        let codes: String = names.iter().map(|n| one_letter_code(n)).collect();
        assert_eq!(codes, "ARNDCQEGHILKMFPSTWYV");
    }

    #[test]
    fn one_letter_code_is_case_and_whitespace_insensitive() {
        assert_eq!(one_letter_code(" lys "), 'K');
        assert_eq!(one_letter_code("Trp"), 'W');
    }

    #[test]
    fn one_letter_code_maps_aliases_and_modified_residues() {
        assert_eq!(one_letter_code("HSE"), 'H');
        assert_eq!(one_letter_code("MSE"), 'M');
        assert_eq!(one_letter_code("SEP"), 'S');
        assert_eq!(one_letter_code("PTR"), 'Y');
    }

    #[test]
    fn one_letter_code_falls_back_to_x() {
        assert_eq!(one_letter_code("HOH"), 'X');
        assert_eq!(one_letter_code(""), 'X');
        assert_eq!(one_letter_code("ATP"), 'X');
    }
}
