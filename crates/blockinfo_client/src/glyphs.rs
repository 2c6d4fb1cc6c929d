/// Advance of a space in the notification font, in pixels.
pub const SPACE_WIDTH: u32 = 8;

/// Width assumed for characters missing from the table.
pub const DEFAULT_WIDTH: u32 = 15;

/// Pixel advance of `c` in the notification font.
pub fn glyph_width(c: char) -> u32 {
    match c {
        ' ' | '!' | 'I' | '`' | 'i' | 'j' | 'l' | '\u{a0}' | '¡' | '¨' | '¯' | '´' | '¸' | 'Ì' | 'Í' |
        'Î' | 'Ï' | 'ì' | 'í' | 'î' | 'ï' | 'Ĩ' | 'ĩ' | 'Ī' | 'ī' | 'Į' | 'į' | 'İ' | 'ı' |
        'ĵ' | 'ĺ' | 'ļ' | 'ľ' | 'ł' | 'ˆ' | 'ˇ' | '˘' | '˙' | '˚' | '˛' | '˜' | '˝' | 'І' |
        'Ї' | 'і' | 'ї' | '‹' | '›' | '∙' => 8,
        '"' | '-' | 'r' | 'ª' | '\u{ad}' | 'º' | 'ŀ' | 'ŕ' | 'ŗ' | 'ř' => 10,
        '#' | '0' | '2' | '4' | '5' | '6' | '8' | '9' | 'C' | 'X' | 'Z' | '¤' | '¥' | 'Ç' |
        'ß' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' | 'Ź' | 'Ż' | 'Ž' | 'ƒ' | 'Ё' | 'Ќ' | 'А' | 'Б' | 'В' |
        'Д' | 'И' | 'Й' | 'П' | 'Р' | 'С' | 'Т' | 'У' | 'Х' | 'Ь' | '€' => 19,
        '$' | '&' | 'G' | 'H' | 'P' | 'U' | 'V' | 'Y' | '§' | 'Ù' | 'Ú' | 'Û' | 'Ü' | 'Þ' |
        'Ā' | 'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' | 'Ĥ' | 'Ħ' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' | 'О' |
        'Ф' | 'Ц' | 'Ъ' | 'Я' | 'ж' | 'ы' | '†' | '‡' => 20,
        '%' | 'Ĳ' | 'Ы' => 24,
        '\'' | '|' | '¦' | 'ˉ' | '‘' | '’' | '‚' => 6,
        '(' | ')' | ',' | '.' | '1' | ':' | ';' | '[' | ']' | 'f' | 't' | '{' | '}' | '·' |
        'ţ' | 'ť' | 'ŧ' | 'ț' => 9,
        '*' | '²' | '³' | '¹' => 11,
        '+' | '<' | '=' | '>' | 'E' | '^' | '~' | '¬' | '±' | '¶' | 'È' | 'É' | 'Ê' | 'Ë' |
        '×' | '÷' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' | 'Є' | 'Џ' | 'Е' | 'Н' | 'Э' | '−' => 18,
        '/' | 'ĳ' | 'т' | 'э' | 'є' => 14,
        '3' | 'F' | 'K' | 'T' | 'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'k' | 'n' | 'o' | 'p' |
        'q' | 's' | 'u' | 'y' | '£' | 'µ' | 'Ý' | 'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'è' |
        'é' | 'ê' | 'ë' | 'ð' | 'ñ' | 'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ù' | 'ú' | 'û' |
        'ü' | 'ý' | 'þ' | 'ÿ' | 'ā' | 'ă' | 'ą' | 'ď' | 'đ' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' |
        'ĝ' | 'ğ' | 'ġ' | 'ģ' | 'ĥ' | 'ħ' | 'Ķ' | 'ķ' | 'ń' | 'ņ' | 'ň' | 'ŉ' | 'ō' | 'ŏ' |
        'ő' | 'ś' | 'ŝ' | 'ş' | 'š' | 'Ţ' | 'Ť' | 'Ŧ' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' |
        'Ŷ' | 'ŷ' | 'Ÿ' | 'ș' | 'Ț' | 'Ў' | 'З' | 'К' | 'Л' | 'б' | 'д' | 'е' | 'к' | 'р' |
        'у' | 'ц' | 'я' | 'ё' | 'ђ' | 'ћ' | 'ў' | 'џ' => 17,
        '7' | '?' | 'J' | 'c' | 'z' | '¢' | '¿' | 'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' | 'Ĵ' | 'ź' |
        'ż' | 'ž' | 'Ѓ' | 'Ј' | 'Ч' | 'а' | 'в' | 'и' | 'й' | 'н' | 'о' | 'п' | 'с' | 'ъ' |
        'ь' | 'ѓ' | 'ѕ' | 'ќ' => 16,
        '@' | '©' | '®' | 'м' | 'ш' | 'њ' => 25,
        'A' | 'B' | 'D' | 'N' | 'O' | 'Q' | 'R' | 'S' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' |
        'Ð' | 'Ñ' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ă' | 'Ą' | 'Ď' | 'Đ' | 'Ń' | 'Ņ' |
        'Ň' | 'Ō' | 'Ŏ' | 'Ő' | 'Ŕ' | 'Ŗ' | 'Ř' | 'Ś' | 'Ŝ' | 'Ş' | 'Š' | 'Ș' | 'Ѕ' | 'Њ' |
        'Ж' | 'ф' | '□' => 21,
        'L' | '_' | 'v' | 'x' | '«' | '»' | 'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' | 'Г' | 'г' | 'з' |
        'л' | 'х' | 'ч' | 'Ґ' | '–' | '•' => 15,
        'M' | 'М' | 'Ш' => 26,
        'W' | 'Æ' | 'Œ' | 'Ŵ' | '—' | '…' | '‰' => 31,
        '\\' | '°' | '“' | '”' | '„' => 12,
        'm' | 'w' | '¼' | 'ŵ' | 'Ю' | 'щ' => 27,
        '½' | 'Щ' => 29,
        '¾' | 'æ' | 'œ' | 'Љ' => 28,
        'ю' => 23,
        'ј' => 7,
        'љ' => 22,
        'ґ' => 13,
        '™' => 30,
        _ => DEFAULT_WIDTH,
    }
}

pub fn text_width(text: &str) -> u32 {
    text.chars().map(glyph_width).sum()
}
