//! Replacement table used by slugify. Input is lowercased before lookup, so
//! only lowercase keys are listed. Some replacements are intentionally upper
//! case (currency codes, trademark signs).

pub(super) fn lookup(c: char) -> Option<&'static str> {
    Some(match c {
        // latin
        'ß' => "ss",
        'à' => "a",
        'á' => "a",
        'â' => "a",
        'ã' => "a",
        'ä' => "ae",
        'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' => "e",
        'é' => "e",
        'ê' => "e",
        'ë' => "e",
        'ì' => "i",
        'í' => "i",
        'î' => "i",
        'ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò' => "o",
        'ó' => "o",
        'ô' => "o",
        'õ' => "o",
        'ö' => "oe",
        'ő' => "o",
        'ø' => "o",
        'ù' => "u",
        'ú' => "u",
        'û' => "u",
        'ü' => "ue",
        'ű' => "u",
        'ý' => "y",
        'þ' => "th",
        'ÿ' => "y",
        // greek
        'α' => "a",
        'β' => "b",
        'γ' => "g",
        'δ' => "d",
        'ε' => "e",
        'ζ' => "z",
        'η' => "h",
        'θ' => "8",
        'ι' => "i",
        'κ' => "k",
        'λ' => "l",
        'μ' => "m",
        'ν' => "n",
        'ξ' => "3",
        'ο' => "o",
        'π' => "p",
        'ρ' => "r",
        'σ' => "s",
        'τ' => "t",
        'υ' => "y",
        'φ' => "f",
        'χ' => "x",
        'ψ' => "ps",
        'ω' => "w",
        'ά' => "a",
        'έ' => "e",
        'ί' => "i",
        'ό' => "o",
        'ύ' => "y",
        'ή' => "h",
        'ώ' => "w",
        'ς' => "s",
        'ϊ' => "i",
        'ΰ' => "y",
        'ϋ' => "y",
        'ΐ' => "i",
        // turkish
        'ş' => "s",
        'ı' => "i",
        'ğ' => "g",
        // macedonian
        'ќ' => "kj",
        'љ' => "lj",
        'њ' => "nj",
        // russian
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // ukrainian
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        // czech
        'č' => "c",
        'ď' => "d",
        'ě' => "e",
        'ň' => "n",
        'ř' => "r",
        'š' => "s",
        'ť' => "t",
        'ů' => "u",
        'ž' => "z",
        // polish
        'ą' => "a",
        'ć' => "c",
        'ę' => "e",
        'ł' => "l",
        'ń' => "n",
        'ś' => "s",
        'ź' => "z",
        'ż' => "z",
        // latvian
        'ā' => "a",
        'ē' => "e",
        'ģ' => "g",
        'ī' => "i",
        'ķ' => "k",
        'ļ' => "l",
        'ņ' => "n",
        'ū' => "u",
        // arabic
        'ا' => "a",
        'أ' => "a",
        'إ' => "i",
        'آ' => "aa",
        'ؤ' => "u",
        'ئ' => "e",
        'ء' => "a",
        'ب' => "b",
        'ت' => "t",
        'ث' => "th",
        'ج' => "j",
        'ح' => "h",
        'خ' => "kh",
        'د' => "d",
        'ذ' => "th",
        'ر' => "r",
        'ز' => "z",
        'س' => "s",
        'ش' => "sh",
        'ص' => "s",
        'ض' => "dh",
        'ط' => "t",
        'ظ' => "z",
        'ع' => "a",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ك' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'ه' => "h",
        'و' => "w",
        'ي' => "y",
        'ى' => "a",
        'ة' => "h",
        'ﻻ' => "la",
        'ﻷ' => "laa",
        'ﻹ' => "lai",
        'ﻵ' => "laa",
        // arabic diacritics
        '\u{64e}' => "a",
        '\u{64b}' => "an",
        '\u{650}' => "e",
        '\u{64d}' => "en",
        '\u{64f}' => "u",
        '\u{64c}' => "on",
        // arabic numbers
        '٠' => "0",
        '١' => "1",
        '٢' => "2",
        '٣' => "3",
        '٤' => "4",
        '٥' => "5",
        '٦' => "6",
        '٧' => "7",
        '٨' => "8",
        '٩' => "9",
        // symbols
        '“' => "\"",
        '”' => "\"",
        '‘' => "'",
        '’' => "'",
        '∂' => "d",
        'ƒ' => "f",
        '™' => "(TM)",
        '©' => "(C)",
        'œ' => "oe",
        '®' => "(R)",
        '†' => "+",
        '℠' => "(SM)",
        '…' => "...",
        '˚' => "o",
        'º' => "o",
        'ª' => "a",
        '•' => "*",
        // currency
        '$' => "USD",
        '€' => "EUR",
        '₢' => "BRN",
        '₣' => "FRF",
        '£' => "GBP",
        '₤' => "ITL",
        '₦' => "NGN",
        '₧' => "ESP",
        '₩' => "KRW",
        '₪' => "ILS",
        '₫' => "VND",
        '₭' => "LAK",
        '₮' => "MNT",
        '₯' => "GRD",
        '₱' => "ARS",
        '₲' => "PYG",
        '₳' => "ARA",
        '₴' => "UAH",
        '₵' => "GHS",
        '¢' => "cent",
        '¥' => "CNY",
        '元' => "CNY",
        '円' => "YEN",
        '﷼' => "IRR",
        '₠' => "EWE",
        '฿' => "THB",
        '₨' => "INR",
        '₹' => "INR",
        '₰' => "PF",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::lookup;

    #[rstest]
    #[case('é', Some("e"))]
    #[case('ö', Some("oe"))]
    #[case('ß', Some("ss"))]
    #[case('щ', Some("sch"))]
    #[case('€', Some("EUR"))]
    #[case('™', Some("(TM)"))]
    #[case('٣', Some("3"))]
    #[case('a', None)]
    #[case('-', None)]
    #[case('ъ', None)]
    fn lookup_table(#[case] input: char, #[case] expected: Option<&str>) {
        assert_eq!(lookup(input), expected);
    }
}
