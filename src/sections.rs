//! Text content of each page section, resolved for one language.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::config::SiteSettings;
use crate::content::{
    EducationItem,
    LanguageSkill,
    Paragraphs,
    sort_timeline,
};
use crate::language::Language;
use crate::resolver::Translator;

/// Introduction at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    /// Owner name.
    pub name: String,
    /// `"<title> – <subtitle>"`
    pub headline: String,
    /// One-line pitch.
    pub tagline: String,
    /// Label of the CV download button.
    pub download_cv: String,
    /// Label of the contact button.
    pub contact_me: String,
}

/// About section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct About {
    /// Section title.
    pub title: String,
    /// Body text, one entry per paragraph.
    pub paragraphs: Vec<String>,
}

/// Education timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Education {
    /// Section title.
    pub title: String,
    /// Oldest first.
    pub timeline: Vec<EducationItem>,
}

/// Titled list of skills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGroup<T> {
    /// Group title.
    pub title: String,
    /// Entries, in catalog order.
    pub items: Vec<T>,
}

/// Skills section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skills {
    /// Section title.
    pub title: String,
    /// Technologies and tools.
    pub technical: SkillGroup<String>,
    /// Spoken languages with their levels.
    pub languages: SkillGroup<LanguageSkill>,
    /// Soft skills.
    pub soft: SkillGroup<String>,
}

/// Contact section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Section title.
    pub title: String,
    /// Invitation to get in touch.
    pub subtitle: String,
    /// Label of the WhatsApp link.
    pub whatsapp_label: String,
    /// Text shown under the WhatsApp link.
    pub whatsapp_note: String,
    /// Chat link; empty when not configured.
    pub whatsapp_url: String,
    /// Heading shown once a message was accepted.
    pub success: String,
    /// Thanks shown under the success heading.
    pub thanks: String,
    /// Label of the button returning to an empty form.
    pub send_another: String,
}

/// One language in the switcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherEntry {
    /// The language this entry switches to.
    pub language: Language,
    /// Name of the language, in the page's language.
    pub label: String,
    /// Whether this is the page's language.
    pub active: bool,
}

/// Page footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// Label preceding the tools used to build the site.
    pub built_with: String,
    /// Tools listed after `built_with`.
    pub tools: Vec<String>,
    /// `"© <year> <owner>. <all rights>"`
    pub copyright: String,
    /// Language switcher entries.
    pub switcher: Vec<SwitcherEntry>,
}

/// Every section of the page in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Language the page is rendered in.
    pub language: Language,
    /// Hero section.
    pub hero: Hero,
    /// About section.
    pub about: About,
    /// Education section.
    pub education: Education,
    /// Skills section.
    pub skills: Skills,
    /// Contact section.
    pub contact: Contact,
    /// Footer.
    pub footer: Footer,
}

impl Page {
    /// Resolve every section. Missing texts show their key and missing lists render empty.
    #[must_use]
    pub fn build(translator: &Translator<'_>, settings: &SiteSettings, year: i32) -> Self {
        Self {
            language: translator.language(),
            hero: Hero::build(translator, &settings.owner_name),
            about: About::build(translator),
            education: Education::build(translator),
            skills: Skills::build(translator),
            contact: Contact::build(translator, &settings.contact.whatsapp_url),
            footer: Footer::build(translator, settings, year),
        }
    }
}

/// Typed list lookup that degrades to an empty list.
fn list_or_empty<T: DeserializeOwned>(translator: &Translator<'_>, key: &str) -> Vec<T> {
    translator.structured(key).unwrap_or_else(|e| {
        tracing::warn!("Rendering '{}' as empty: {}", key, e);
        Vec::new()
    })
}

impl Hero {
    /// Resolve the hero texts.
    fn build(translator: &Translator<'_>, owner_name: &str) -> Self {
        Self {
            name: owner_name.to_string(),
            headline: format!("{} – {}", translator.t("hero.title"), translator.t("hero.subtitle")),
            tagline: translator.t("hero.tagline").into_owned(),
            download_cv: translator.t("hero.downloadCV").into_owned(),
            contact_me: translator.t("hero.contactMe").into_owned(),
        }
    }
}

impl About {
    /// Resolve the about texts.
    fn build(translator: &Translator<'_>) -> Self {
        let paragraphs = translator
            .structured::<Paragraphs>("about.text")
            .map(Paragraphs::into_vec)
            .unwrap_or_else(|e| {
                tracing::warn!("Rendering 'about.text' as empty: {}", e);
                Vec::new()
            });

        Self { title: translator.t("about.title").into_owned(), paragraphs }
    }
}

impl Education {
    /// Resolve the timeline, skipping invalid entries.
    fn build(translator: &Translator<'_>) -> Self {
        let mut timeline: Vec<EducationItem> = list_or_empty(translator, "education.items");
        timeline.retain(|item| match item.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Skipping education entry: {}", e);
                false
            }
        });
        sort_timeline(&mut timeline);

        Self { title: translator.t("education.title").into_owned(), timeline }
    }
}

impl Skills {
    /// Resolve the three skill groups.
    fn build(translator: &Translator<'_>) -> Self {
        let mut languages: Vec<LanguageSkill> = list_or_empty(translator, "skills.languages.items");
        languages.retain(|skill| match skill.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Skipping language skill: {}", e);
                false
            }
        });

        Self {
            title: translator.t("skills.title").into_owned(),
            technical: SkillGroup {
                title: translator.t("skills.technical.title").into_owned(),
                items: list_or_empty(translator, "skills.technical.items"),
            },
            languages: SkillGroup {
                title: translator.t("skills.languages.title").into_owned(),
                items: languages,
            },
            soft: SkillGroup {
                title: translator.t("skills.soft.title").into_owned(),
                items: list_or_empty(translator, "skills.soft.items"),
            },
        }
    }
}

impl Contact {
    /// Resolve the contact texts, including those of the submitted state.
    #[must_use]
    pub fn build(translator: &Translator<'_>, whatsapp_url: &str) -> Self {
        Self {
            title: translator.t("contact.title").into_owned(),
            subtitle: translator.t("contact.subtitle").into_owned(),
            whatsapp_label: translator.t("contact.whatsapp").into_owned(),
            whatsapp_note: translator.t("contact.whatsappNote").into_owned(),
            whatsapp_url: whatsapp_url.to_string(),
            success: translator.t("contact.form.success").into_owned(),
            thanks: translator.t("contact.form.thanks").into_owned(),
            send_another: translator.t("contact.form.another").into_owned(),
        }
    }
}

impl Footer {
    /// Resolve the footer texts and switcher.
    fn build(translator: &Translator<'_>, settings: &SiteSettings, year: i32) -> Self {
        let switcher = Language::ALL
            .into_iter()
            .map(|language| SwitcherEntry {
                language,
                label: translator.t(language.switcher_key()).into_owned(),
                active: language == translator.language(),
            })
            .collect();

        Self {
            built_with: translator.t("footer.builtWith").into_owned(),
            tools: settings.built_with_tools.clone(),
            copyright: format!(
                "© {year} {}. {}",
                settings.owner_name,
                translator.t("footer.allRights")
            ),
            switcher,
        }
    }
}

/// Width of the skill bars in the text rendering.
const BAR_WIDTH: u16 = 20;

/// Text bar for a skill percentage, `BAR_WIDTH` cells wide.
fn skill_bar(percent: u8) -> String {
    let filled = usize::from(u16::from(percent.min(100)) * BAR_WIDTH / 100);
    let empty = usize::from(BAR_WIDTH) - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.hero.name)?;
        writeln!(f, "{}", self.hero.headline)?;
        writeln!(f, "{}", self.hero.tagline)?;
        writeln!(f, "  > {}    > {}", self.hero.download_cv, self.hero.contact_me)?;

        writeln!(f, "\n## {}\n", self.about.title)?;
        for paragraph in &self.about.paragraphs {
            writeln!(f, "{paragraph}\n")?;
        }

        writeln!(f, "## {}\n", self.education.title)?;
        for item in &self.education.timeline {
            writeln!(f, "{:>11}  {}", item.year_label(), item.title)?;
            writeln!(f, "{:>11}  {}", "", item.description)?;
        }

        writeln!(f, "\n## {}\n", self.skills.title)?;
        writeln!(f, "### {}", self.skills.technical.title)?;
        for item in &self.skills.technical.items {
            writeln!(f, "  • {item}")?;
        }
        writeln!(f, "### {}", self.skills.languages.title)?;
        for skill in &self.skills.languages.items {
            writeln!(f, "  {:<12} {} {}", skill.language, skill_bar(skill.percent), skill.level)?;
        }
        writeln!(f, "### {}", self.skills.soft.title)?;
        for item in &self.skills.soft.items {
            writeln!(f, "  • {item}")?;
        }

        writeln!(f, "\n## {}\n", self.contact.title)?;
        writeln!(f, "{}", self.contact.subtitle)?;
        if !self.contact.whatsapp_url.is_empty() {
            writeln!(f, "{}: {}", self.contact.whatsapp_label, self.contact.whatsapp_url)?;
            writeln!(f, "{}", self.contact.whatsapp_note)?;
        }

        let switcher = self
            .footer
            .switcher
            .iter()
            .map(|entry| {
                if entry.active { format!("[{}]", entry.label) } else { entry.label.clone() }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        let tools = self.footer.tools.join(" · ");
        writeln!(f, "\n---\n{} {}    {}", self.footer.built_with, tools, switcher)?;
        write!(f, "{}", self.footer.copyright)
    }
}
