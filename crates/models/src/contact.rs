/// Digits-only phone number for wa.me links; a bare 10-digit number gets the 91 prefix.
pub fn normalize_whatsapp_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("91{digits}")
    } else {
        digits
    }
}

pub fn whatsapp_url(phone: &str) -> String {
    format!("https://wa.me/{}", normalize_whatsapp_number(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_country_code_to_local_numbers() {
        assert_eq!(normalize_whatsapp_number("98765 43210"), "919876543210");
        assert_eq!(normalize_whatsapp_number("+91-98765-43210"), "919876543210");
        assert_eq!(whatsapp_url("9876543210"), "https://wa.me/919876543210");
    }
}
