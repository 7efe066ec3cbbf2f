//! Pre-approved reply templates and suggested-action tables
//!
//! Templates use `{name}` for the user's display name. An empty slice means
//! "not authored for this locale"; lookups then use the default locale's set
//! for the same strategy, never another strategy.

use crate::error::{Result, SolaceError};
use crate::types::{EmotionCategory, Locale, ResponseStrategy};

/// Placeholder substituted with the display name
pub const NAME_PLACEHOLDER: &str = "{name}";

// =============================================================================
// Templates
// =============================================================================

const EN_CRISIS: &[&str] = &[
    "I'm very concerned about what you're sharing, {name}. Your life has value and there are people who want to help. Please contact emergency services immediately at 112 or reach out to a trusted person. You don't have to face this alone.",
    "I can hear that you're in tremendous pain right now, {name}. These feelings are overwhelming, but they can change. Please get immediate help - contact emergency services or go to your nearest emergency room.",
    "What you're experiencing sounds incredibly difficult, {name}. Please know that there are trained professionals ready to help you through this crisis. Contact emergency services or reach out to someone you trust right now.",
];

const EN_SUPPORTIVE: &[&str] = &[
    "I can hear that you're going through a really tough time, {name}. It takes courage to share these feelings. What you're experiencing is valid.",
    "Thank you for trusting me with your feelings, {name}. It sounds like you're carrying a lot right now. Remember that difficult emotions are temporary.",
    "{name}, I want you to know that your feelings matter and so do you. It's completely normal to have ups and downs. You don't have to face this alone.",
];

const EN_THERAPEUTIC: &[&str] = &[
    "I can sense the frustration in your words, {name}. Those feelings are completely understandable. Let's take a moment to breathe together.",
    "{name}, it sounds like you're dealing with some really challenging situations. Anger often comes from feeling unheard. I'm here to listen.",
    "I hear you, {name}. When we're frustrated, everything can feel intense. What would help you feel more in control right now?",
];

const EN_CONVERSATIONAL: &[&str] = &[
    "Thank you for sharing that with me, {name}. How are you feeling about everything right now?",
    "I appreciate you opening up, {name}. What's been on your mind lately?",
    "It sounds like there's a lot going on for you, {name}. Would you like to talk more about what's happening?",
];

const HI_CRISIS: &[&str] = &[
    "{name}, मैं आपकी बात से बहुत चिंतित हूँ। आपका जीवन मूल्यवान है। कृपया तुरंत 112 पर कॉल करें या किसी विश्वसनीय व्यक्ति से संपर्क करें।",
    "{name}, मैं समझ सकता हूँ कि आप बहुत कष्ट में हैं। कृपया तुरंत professional help लें। आप अकेले नहीं हैं।",
];

const HI_SUPPORTIVE: &[&str] = &[
    "{name}, मैं समझ सकता हूँ कि आप मुश्किल दौर से गुज़र रहे हैं। आपकी भावनाएं मायने रखती हैं।",
    "{name}, आपने मुझसे अपनी बात साझा की, इसके लिए धन्यवाद। आप अकेले नहीं हैं।",
];

const NOT_AUTHORED: &[&str] = &[];

fn authored_templates(locale: Locale, strategy: ResponseStrategy) -> &'static [&'static str] {
    use ResponseStrategy::*;
    match (locale, strategy) {
        (Locale::En, Crisis) => EN_CRISIS,
        (Locale::En, Supportive) => EN_SUPPORTIVE,
        (Locale::En, Therapeutic) => EN_THERAPEUTIC,
        (Locale::En, Conversational) => EN_CONVERSATIONAL,
        (Locale::Hi, Crisis) => HI_CRISIS,
        (Locale::Hi, Supportive) => HI_SUPPORTIVE,
        (Locale::Hi, Therapeutic | Conversational) => NOT_AUTHORED,
    }
}

fn fallback_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "I'm here to listen and support you. Sometimes I might not have the perfect response, but I want you to know that your feelings are valid and important. How can I best help you right now?",
        Locale::Hi => "मैं यहाँ आपकी सुनने और मदद करने के लिए हूँ। आपकी भावनाएं महत्वपूर्ण हैं। मैं आपकी कैसे मदद कर सकता हूँ?",
    }
}

// =============================================================================
// Suggested actions
// =============================================================================

const EN_SADNESS_ACTIONS: &[&str] = &[
    "Try a 5-minute mindfulness exercise",
    "Reach out to a trusted friend or family member",
    "Take a gentle walk outside",
    "Write down three things you're grateful for",
];

const EN_ANGER_ACTIONS: &[&str] = &[
    "Practice deep breathing for 2 minutes",
    "Try some physical exercise to release tension",
    "Write down your thoughts to process them",
    "Listen to calming music",
];

const EN_FEAR_ACTIONS: &[&str] = &[
    "Focus on what you can control right now",
    "Try the 5-4-3-2-1 grounding technique",
    "Challenge negative thoughts with evidence",
    "Connect with your support system",
];

const EN_JOY_ACTIONS: &[&str] = &[
    "Celebrate this positive moment!",
    "Reflect on what contributed to these feelings",
    "Share this positivity with someone you care about",
    "Capture this moment in a journal",
];

const HI_SADNESS_ACTIONS: &[&str] = &[
    "5 मिनट का ध्यान करें",
    "किसी विश्वसनीय व्यक्ति से बात करें",
    "बाहर टहलने जाएं",
    "तीन अच्छी बातें लिखें",
];

const HI_ANGER_ACTIONS: &[&str] = &[
    "गहरी सांस लें",
    "थोड़ा व्यायाम करें",
    "अपने विचार लिखें",
    "शांत संगीत सुनें",
];

const EN_CRISIS_ACTIONS: &[&str] = &[
    "Contact emergency services (112) immediately",
    "Go to the nearest hospital emergency room",
    "Call a crisis helpline for immediate support",
    "Stay with trusted individuals - don't be alone",
];

const HI_CRISIS_ACTIONS: &[&str] = &[
    "आपातकालीन सेवाओं (112) से तुरंत संपर्क करें",
    "नज़दीकी अस्पताल के आपातकालीन कक्ष में जाएं",
    "तुरंत सहायता के लिए क्राइसिस हेल्पलाइन पर कॉल करें",
    "भरोसेमंद लोगों के साथ रहें - अकेले न रहें",
];

/// Action list for (locale, emotion); `None` when not authored
fn authored_actions(locale: Locale, emotion: EmotionCategory) -> Option<&'static [&'static str]> {
    use EmotionCategory::*;
    match (locale, emotion) {
        (Locale::En, Sadness) => Some(EN_SADNESS_ACTIONS),
        (Locale::En, Anger) => Some(EN_ANGER_ACTIONS),
        (Locale::En, Fear) => Some(EN_FEAR_ACTIONS),
        (Locale::En, Joy) => Some(EN_JOY_ACTIONS),
        (Locale::Hi, Sadness) => Some(HI_SADNESS_ACTIONS),
        (Locale::Hi, Anger) => Some(HI_ANGER_ACTIONS),
        _ => None,
    }
}

fn authored_crisis_actions(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => EN_CRISIS_ACTIONS,
        Locale::Hi => HI_CRISIS_ACTIONS,
    }
}

fn authored_professional_support(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Consider speaking with a mental health professional",
        Locale::Hi => "किसी मानसिक स्वास्थ्य विशेषज्ञ से बात करने पर विचार करें",
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Validated view over the authored tables
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    default: Locale,
}

impl TemplateCatalog {
    /// Validate tables for `default` and build the catalog. Run at startup.
    pub fn load(default: Locale) -> Result<Self> {
        for strategy in ResponseStrategy::ALL {
            if authored_templates(default, strategy).is_empty() {
                return Err(SolaceError::Config(format!(
                    "default locale '{}' has no templates for strategy '{}'",
                    default,
                    strategy.audit_id()
                )));
            }
        }
        if authored_actions(default, EmotionCategory::Sadness).is_none() {
            return Err(SolaceError::Config(format!(
                "default locale '{}' has no sadness actions",
                default
            )));
        }
        if authored_crisis_actions(default).is_empty() {
            return Err(SolaceError::Config(format!(
                "default locale '{}' has no crisis actions",
                default
            )));
        }
        Ok(Self { default })
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    /// Template set for (locale, strategy), default locale if not authored
    pub fn templates(&self, locale: Locale, strategy: ResponseStrategy) -> &'static [&'static str] {
        let set = authored_templates(locale, strategy);
        if set.is_empty() {
            authored_templates(self.default, strategy)
        } else {
            set
        }
    }

    /// Emotion-based actions. A locale without any action table uses the
    /// default locale's; an emotion without a list uses the sadness list.
    pub fn emotion_actions(&self, locale: Locale, emotion: EmotionCategory) -> &'static [&'static str] {
        let table = if Self::has_action_table(locale) { locale } else { self.default };
        authored_actions(table, emotion)
            .or_else(|| authored_actions(table, EmotionCategory::Sadness))
            .unwrap_or(&[])
    }

    fn has_action_table(locale: Locale) -> bool {
        EmotionCategory::ALL
            .iter()
            .any(|e| authored_actions(locale, *e).is_some())
    }

    /// The fixed crisis list for a locale
    pub fn crisis_actions(&self, locale: Locale) -> &'static [&'static str] {
        let actions = authored_crisis_actions(locale);
        if actions.is_empty() {
            authored_crisis_actions(self.default)
        } else {
            actions
        }
    }

    pub fn professional_support(&self, locale: Locale) -> &'static str {
        authored_professional_support(locale)
    }

    pub fn fallback_message(&self, locale: Locale) -> &'static str {
        fallback_message(locale)
    }
}

/// Substitute the display name into a template
pub fn render(template: &str, display_name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, display_name)
}

// =============================================================================
// TESTS
// =============================================================================
