//! Display formatting for transaction fields

/// Human label for a transaction status; unknown statuses pass through
pub fn format_status(status: &str) -> String {
    let label = match status {
        "processing" => "Processing",
        "authorized" => "Authorized",
        "paid" => "Paid",
        "refunded" => "Refunded",
        "waiting_payment" => "Waiting payment",
        "pending_refund" => "Pending refund",
        "refused" => "Refused",
        "chargedback" => "Chargedback",
        other => other,
    };
    label.to_string()
}

/// CSS modifier used by the status legend dot
pub fn status_class(status: &str) -> &'static str {
    match status {
        "paid" | "authorized" => "status--success",
        "refused" | "chargedback" => "status--danger",
        "refunded" | "pending_refund" => "status--muted",
        _ => "status--warning",
    }
}

/// Masks a CPF (11 digits) or CNPJ (14 digits); anything else is returned as is
pub fn format_cpf_cnpj(document: &str) -> String {
    let digits: String = document.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        ),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        ),
        _ => document.to_string(),
    }
}

pub fn format_payment_method(method: &str, international: bool) -> String {
    let label = match method {
        "credit_card" => "Credit card",
        "debit_card" => "Debit card",
        "boleto" => "Boleto",
        other => other,
    };
    if international {
        format!("{} (international)", label)
    } else {
        label.to_string()
    }
}

/// Amount in cents as Brazilian reais: 123456 -> "R$ 1.234,56"
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let absolute = cents.unsigned_abs();
    let integer_part = (absolute / 100).to_string();
    let decimal_part = absolute % 100;

    // Thousands separator every 3 digits from the right
    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!("{}R$ {},{:02}", sign, grouped, decimal_part)
}

pub fn format_refuse_reason(reason: Option<&str>) -> String {
    match reason {
        None | Some("") => "-".to_string(),
        Some("acquirer") => "Acquirer".to_string(),
        Some("antifraud") => "Antifraud".to_string(),
        Some("internal_error") => "Internal error".to_string(),
        Some("no_acquirer") => "No acquirer".to_string(),
        Some("acquirer_timeout") => "Acquirer timeout".to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn format_card_brand(brand: Option<&str>) -> String {
    match brand {
        None | Some("") => "-".to_string(),
        Some(brand) => {
            let mut chars = brand.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => "-".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(123456), "R$ 1.234,56");
        assert_eq!(format_currency(123456789), "R$ 1.234.567,89");
        assert_eq!(format_currency(5), "R$ 0,05");
        assert_eq!(format_currency(0), "R$ 0,00");
        assert_eq!(format_currency(-100050), "-R$ 1.000,50");
    }

    #[test]
    fn test_format_cpf_cnpj() {
        assert_eq!(format_cpf_cnpj("12345678909"), "123.456.789-09");
        assert_eq!(format_cpf_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_cpf_cnpj("123.456.789-09"), "123.456.789-09");
        assert_eq!(format_cpf_cnpj("42"), "42");
    }

    #[test]
    fn test_format_payment_method() {
        assert_eq!(format_payment_method("credit_card", false), "Credit card");
        assert_eq!(
            format_payment_method("credit_card", true),
            "Credit card (international)"
        );
        assert_eq!(format_payment_method("boleto", false), "Boleto");
        assert_eq!(format_payment_method("pix", false), "pix");
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_status("waiting_payment"), "Waiting payment");
        assert_eq!(format_status("something_new"), "something_new");
        assert_eq!(format_refuse_reason(None), "-");
        assert_eq!(format_refuse_reason(Some("antifraud")), "Antifraud");
        assert_eq!(format_card_brand(Some("visa")), "Visa");
        assert_eq!(format_card_brand(None), "-");
    }
}
