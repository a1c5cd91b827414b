//! Prompt composition for the project assistant.

/// Fixed persona instructions sent with every request.
pub const SYSTEM_PROMPT: &str = "Sen Hirenup platformunun AI proje asistanısın. Girişimcilere ve şirket yöneticilerine proje planlaması, bütçe yönetimi ve ekip kurma konusunda yardımcı oluyorsun.

Senin görevlerin:
1. Proje için yapılması gerekenleri adım adım açıklamak
2. Bütçe planlaması konusunda rehberlik etmek
3. Projeye uygun çalışan/freelancer önerileri sunmak
4. Proje yönetimi ve zaman çizelgesi konusunda tavsiyeler vermek

Türkçe yanıt ver. Profesyonel ama samimi bir dil kullan.";

/// Project fields surfaced to the assistant when the chat names a project.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub name: String,
    pub description: String,
    pub budget: Option<f64>,
    pub industry: Option<String>,
    pub status: String,
}

/// One prior exchange from the client-supplied conversation history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// The fully composed prompt pair handed to a [`crate::ReplyGenerator`].
///
/// Keeps the raw user message and project snapshot alongside the composed
/// text; template selection runs over the message, not the composed prompt.
#[derive(Debug)]
pub struct ChatPrompt<'a> {
    pub system: &'static str,
    pub user: String,
    pub message: &'a str,
    pub project: Option<&'a ProjectSnapshot>,
}

impl<'a> ChatPrompt<'a> {
    pub fn compose(
        message: &'a str,
        project: Option<&'a ProjectSnapshot>,
        history: &[HistoryEntry],
    ) -> Self {
        Self {
            system: SYSTEM_PROMPT,
            user: compose_user_prompt(message, project, history),
            message,
            project,
        }
    }
}

fn compose_user_prompt(
    message: &str,
    project: Option<&ProjectSnapshot>,
    history: &[HistoryEntry],
) -> String {
    let project_block = match project {
        Some(project) => {
            let budget = project
                .budget
                .map(|amount| format!("₺{}", format_budget(amount)))
                .unwrap_or_else(|| "Belirtilmemiş".to_string());
            let industry = project.industry.as_deref().unwrap_or("Belirtilmemiş");

            format!(
                "\n- Proje Adı: {}\n- Açıklama: {}\n- Bütçe: {}\n- Endüstri: {}\n- Durum: {}\n",
                project.name, project.description, budget, industry, project.status
            )
        }
        None => "Yeni proje oluşturuluyor".to_string(),
    };

    let history_block = if history.is_empty() {
        String::new()
    } else {
        let lines = history
            .iter()
            .map(|entry| format!("{}: {}", entry.role, entry.content))
            .collect::<Vec<_>>()
            .join("\n");
        format!("\nÖnceki Konuşma:\n{lines}\n")
    };

    format!(
        "Proje Bilgileri:\n{project_block}\n\nKullanıcı Sorusu: {message}\n\n{history_block}\nLütfen kullanıcının sorusunu yanıtla ve gerekirse proje planlaması, bütçe veya ekip önerileri sun."
    )
}

/// Render a budget amount with Turkish thousands grouping, fraction dropped.
pub fn format_budget(amount: f64) -> String {
    let whole = amount.trunc() as i64;
    let negative = whole < 0;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
