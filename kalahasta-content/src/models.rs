use chrono::{DateTime, Utc};
use kalahasta_core::IdentityProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded audio story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: Uuid,
    pub name: String,

    /// Length in seconds
    pub duration: u32,

    pub timestamp: DateTime<Utc>,

    /// Raw audio bytes (webm)
    #[serde(default)]
    pub audio_blob_data: Vec<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,

    #[serde(default)]
    pub approved: bool,
}

/// Audio captured by the recorder, before it is stored
#[derive(Debug, Clone)]
pub struct NewRecording {
    pub duration: u32,
    pub audio: Vec<u8>,
}

/// A certificate of authenticity for one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub product_name: String,

    /// Verification URL encoded in the certificate's QR code
    pub qr_code: String,

    pub timestamp: DateTime<Utc>,
    pub story: String,
    pub verified: bool,

    #[serde(default)]
    pub certificate_number: String,
}

impl Certification {
    /// `KH-` followed by the last six characters of the id, uppercased
    pub fn number_for(id: &Uuid) -> String {
        let simple = id.simple().to_string();
        format!("KH-{}", simple[simple.len() - 6..].to_uppercase())
    }

    /// Older certificates were stored without a number; derive one.
    pub(crate) fn fill_number(mut self) -> Self {
        if self.certificate_number.is_empty() {
            self.certificate_number = Self::number_for(&self.id);
        }
        self
    }

    /// Plain-text certificate document, as offered for download.
    pub fn render(&self, artist: &impl IdentityProvider) -> String {
        format!(
            "KALAHASTA DIGITAL CERTIFICATE OF AUTHENTICITY\n\
             \n\
             Certificate Number: {number}\n\
             Product: {product}\n\
             Artist: {artist}\n\
             Craft: {craft}\n\
             Date Certified: {date}\n\
             \n\
             Story:\n\
             {story}\n\
             \n\
             QR Code: {qr}\n\
             \n\
             This certificate verifies the authenticity and heritage of the above artwork.\n",
            number = self.certificate_number,
            product = self.product_name,
            artist = artist.display_name(),
            craft = artist.craft(),
            date = self.timestamp.format("%B %-d, %Y"),
            story = self.story,
            qr = self.qr_code,
        )
    }

    pub fn file_name(&self) -> String {
        format!("KalaHasta_Certificate_{}.txt", self.certificate_number)
    }
}

/// `m:ss`, e.g. `125 -> "2:05"`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(125), "2:05");
    }

    #[test]
    fn test_certificate_number_from_id() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(Certification::number_for(&id), "KH-5FE0C8");
    }

    #[test]
    fn test_legacy_certificate_gets_number() {
        let json = serde_json::json!({
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "productName": "Temple Border Saree",
            "qrCode": "https://kalahasta.com/verify/u/1",
            "timestamp": "2024-03-01T10:00:00Z",
            "story": "Woven by hand.",
            "verified": true
        });
        let cert: Certification = serde_json::from_value(json).unwrap();
        assert_eq!(cert.fill_number().certificate_number, "KH-5FE0C8");
    }

    #[test]
    fn test_recording_keeps_audio_field_name() {
        let json = serde_json::json!({
            "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "name": "Recording 1",
            "duration": 42,
            "timestamp": "2024-03-01T10:00:00Z",
            "audioBlobData": [26, 69, 223, 163]
        });
        let recording: Recording = serde_json::from_value(json).unwrap();
        assert_eq!(recording.audio_blob_data, vec![26, 69, 223, 163]);
        assert!(!recording.approved);
    }
}
