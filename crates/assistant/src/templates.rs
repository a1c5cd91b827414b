//! Canned Turkish reply templates keyed by message keywords.

use async_trait::async_trait;

use crate::prompt::{format_budget, ChatPrompt, ProjectSnapshot};
use crate::{AssistantError, ReplyGenerator};

const BUDGET_KEYWORDS: &[&str] = &["bütçe", "maliyet", "fiyat"];
const STAFFING_KEYWORDS: &[&str] = &["çalışan", "ekip", "freelancer", "kim çalışmalı"];
const PLANNING_KEYWORDS: &[&str] = &["yapılması gereken", "adım", "plan", "ne yapmalı"];

/// Deterministic reply generator backed by fixed product copy.
///
/// Keyword matching is case-insensitive and runs over the raw user message
/// only; the composed prompt would match the budget keywords on every
/// request through its closing instruction.
#[derive(Debug, Default)]
pub struct TemplateReplyGenerator;

impl TemplateReplyGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReplyGenerator for TemplateReplyGenerator {
    async fn generate(&self, prompt: &ChatPrompt<'_>) -> Result<String, AssistantError> {
        Ok(select_template(prompt.message, prompt.project))
    }
}

fn select_template(message: &str, project: Option<&ProjectSnapshot>) -> String {
    let message = message.to_lowercase();

    if contains_any(&message, BUDGET_KEYWORDS) {
        return budget_reply(project);
    }
    if contains_any(&message, STAFFING_KEYWORDS) {
        return staffing_reply(project);
    }
    if contains_any(&message, PLANNING_KEYWORDS) {
        return planning_reply(project);
    }

    DEFAULT_TEMPLATE.to_string()
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

fn budget_reply(project: Option<&ProjectSnapshot>) -> String {
    let closing = match project.and_then(|project| project.budget) {
        Some(budget) => format!(
            "\nProjenizin mevcut bütçesi: ₺{}\nBu bütçeye göre size özel bir planlama yapabilirim. Hangi alan hakkında daha detaylı bilgi istersiniz?\n",
            format_budget(budget)
        ),
        None => "Bütçenizi belirtirseniz, size daha spesifik öneriler sunabilirim.".to_string(),
    };

    format!("{BUDGET_TEMPLATE}\n\n{closing}")
}

fn staffing_reply(project: Option<&ProjectSnapshot>) -> String {
    let closing = match project.and_then(|project| project.budget) {
        Some(budget) => format!(
            "\nBütçenize (₺{}) göre size uygun freelancer ve çalışan önerileri sunabilirim. Hangi rolle başlamak istersiniz?\n",
            format_budget(budget)
        ),
        None => {
            "Bütçenizi belirtirseniz, size en uygun çalışan önerilerini sunabilirim.".to_string()
        }
    };

    format!("{STAFFING_TEMPLATE}\n\n{closing}\n\n{STAFFING_NOTE}")
}

fn planning_reply(project: Option<&ProjectSnapshot>) -> String {
    let closing = match project {
        Some(project) => format!(
            "\nProjenizin mevcut durumu: {}\nHangi fazda olduğunuzu belirtirseniz, o faz için daha detaylı rehberlik sunabilirim.\n",
            project.status
        ),
        None => {
            "Hangi aşamada olduğunuzu belirtirseniz, size daha spesifik adımlar sunabilirim."
                .to_string()
        }
    };

    format!("{PLANNING_TEMPLATE}\n\n{closing}")
}

const BUDGET_TEMPLATE: &str = "Bütçe planlaması için şu adımları izlemenizi öneririm:

1. **Proje Kapsamını Belirleyin**:
   - Hangi özellikler minimum gereklidir (MVP)?
   - Hangi özellikler sonraya bırakılabilir?

2. **Kaynak İhtiyacını Hesaplayın**:
   - Geliştirme ekibi (frontend, backend, tasarım)
   - Altyapı ve hosting maliyetleri
   - Pazarlama ve tanıtım bütçesi
   - Yasal ve danışmanlık giderleri

3. **Bütçe Dağılımı** (Önerilen):
   - Geliştirme: %50-60
   - Pazarlama: %20-30
   - Altyapı: %10-15
   - Acil durum fonu: %10-15";

const STAFFING_TEMPLATE: &str = "Projeniz için ekip oluştururken şu rollere ihtiyacınız olabilir:

**Temel Ekip Yapısı:**

1. **Proje Yöneticisi** (PM)
   - Proje planlaması ve takibi
   - Ekip koordinasyonu
   - Bütçe: ₺15,000-30,000/ay veya ₺500-1,000/saat

2. **Geliştirici(lar)**
   - Frontend Developer (React/Next.js)
   - Backend Developer (Node.js/Python)
   - Bütçe: ₺20,000-50,000/ay veya ₺800-2,000/saat

3. **Tasarımcı**
   - UI/UX Designer
   - Bütçe: ₺10,000-25,000/ay veya ₺400-1,000/saat

4. **Diğer Roller** (İhtiyaca göre):
   - DevOps Engineer
   - QA Tester
   - Pazarlama Uzmanı";

const STAFFING_NOTE: &str = "**Not**: Platformumuzda bütçenize uygun freelancer'ları filtreleyebilir ve doğrudan iletişime geçebilirsiniz.";

const PLANNING_TEMPLATE: &str = "Projeniz için yapılması gerekenler:

**1. Faza: Planlama ve Hazırlık**
   - Proje gereksinimlerini detaylandırın
   - Teknik mimariyi tasarlayın
   - Zaman çizelgesi oluşturun
   - Bütçe planlaması yapın

**2. Faza: Ekip Kurulumu**
   - Gerekli rolleri belirleyin
   - Freelancer veya çalışan arayın
   - Ekip üyelerini işe alın

**3. Faza: Geliştirme**
   - MVP (Minimum Viable Product) geliştirin
   - Test ve iyileştirmeler yapın
   - Düzenli geri bildirim toplayın

**4. Faza: Lansman**
   - Ürünü yayınlayın
   - Pazarlama kampanyaları başlatın
   - Kullanıcı desteği kurun

**5. Faza: İyileştirme**
   - Kullanıcı geri bildirimlerini değerlendirin
   - Yeni özellikler ekleyin
   - Ölçeklendirme planları yapın";

const DEFAULT_TEMPLATE: &str = "Merhaba! Projeniz hakkında size nasıl yardımcı olabilirim?

Size şu konularda destek sunabilirim:
- 📋 Proje planlaması ve yapılacaklar listesi
- 💰 Bütçe planlaması ve maliyet tahmini
- 👥 Ekip kurma ve çalışan önerileri
- 📅 Zaman çizelgesi oluşturma
- 🎯 MVP stratejisi

Hangi konuda yardıma ihtiyacınız var?";
