use foundation::Position;
use serde::Deserialize;

use crate::error::GeolocationErrorKind;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    /// Lenient parse for user-supplied tags such as `en-US` or `AR`.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "en" || tag.starts_with("en-") || tag.starts_with("en_") {
            Locale::En
        } else {
            Locale::Ar
        }
    }
}

/// Every user-facing string the flow shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Messages {
    pub button_idle: &'static str,
    pub button_busy: &'static str,
    pub located_prefix: &'static str,
    pub permission_denied: &'static str,
    pub position_unavailable: &'static str,
    pub timeout: &'static str,
    pub location_other: &'static str,
    pub verified: &'static str,
    pub verify_failed: &'static str,
    pub rejected: &'static str,
    pub not_json: &'static str,
    pub network_failure: &'static str,
    pub malformed: &'static str,
    pub popup_blocked: &'static str,
    pub marker_popup: &'static str,
    pub area_popup: &'static str,
}

static AR: Messages = Messages {
    button_idle: "فتح النموذج الآن",
    button_busy: "جارٍ التحقق من الموقع...",
    located_prefix: "📍 موقعك الحالي:",
    permission_denied: "🚫 رفضت إذن تحديد الموقع.",
    position_unavailable: "⚠️ تعذر الحصول على موقعك.",
    timeout: "⏱️ انتهى الوقت بدون استجابة.",
    location_other: "❌ تعذر تحديد الموقع.",
    verified: "✅ تم التحقق، جاري فتح النموذج المحمي...",
    verify_failed: "⚠️ فشل التحقق أو الاتصال.",
    rejected: "تم رفض التحقق أو لا يوجد توكن",
    not_json: "🧨 الرد ليس JSON.",
    network_failure: "تعذر الاتصال بالخادم.",
    malformed: "تعذر قراءة رد الخادم.",
    popup_blocked: "🚫 منع المتصفح فتح نافذة النموذج.",
    marker_popup: "📍 موقعك الحالي",
    area_popup: "✅ المنطقة المسموح بها",
};

static EN: Messages = Messages {
    button_idle: "Open the form now",
    button_busy: "Checking your location...",
    located_prefix: "📍 Your current location:",
    permission_denied: "🚫 Location permission was denied.",
    position_unavailable: "⚠️ Your location could not be determined.",
    timeout: "⏱️ Timed out waiting for a location.",
    location_other: "❌ Unable to determine your location.",
    verified: "✅ Verified, opening the protected form...",
    verify_failed: "⚠️ Verification or connection failed.",
    rejected: "Verification was rejected or no token was issued",
    not_json: "🧨 The response is not JSON.",
    network_failure: "Could not reach the server.",
    malformed: "The server response could not be read.",
    popup_blocked: "🚫 The browser blocked the form window.",
    marker_popup: "📍 Your current location",
    area_popup: "✅ Permitted area",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Ar => &AR,
            Locale::En => &EN,
        }
    }

    pub fn located(&self, position: &Position) -> String {
        format!("{} {}", self.located_prefix, position.display_pair())
    }

    pub fn geolocation_error(&self, kind: GeolocationErrorKind) -> &'static str {
        match kind {
            GeolocationErrorKind::PermissionDenied => self.permission_denied,
            GeolocationErrorKind::PositionUnavailable => self.position_unavailable,
            GeolocationErrorKind::Timeout => self.timeout,
            GeolocationErrorKind::Other => self.location_other,
        }
    }

    /// Status line for a failed exchange: the headline followed by the detail.
    pub fn verify_failure(&self, detail: &str) -> String {
        if detail.is_empty() {
            self.verify_failed.to_string()
        } else {
            format!("{} {}", self.verify_failed, detail)
        }
    }
}
