use chrono::Utc;
use kalahasta_core::repository::{load_collection, save_collection};
use kalahasta_core::{IdentityProvider, Session};
use kalahasta_shared::keys;
use uuid::Uuid;

use crate::models::{Certification, Recording};
use crate::{ContentError, ContentStore};

const VERIFY_BASE_URL: &str = "https://kalahasta.com/verify";

impl ContentStore {
    pub async fn list_certifications(&self, session: &Session) -> Result<Vec<Certification>, ContentError> {
        let certifications: Vec<Certification> =
            load_collection(self.store(), &keys::certifications(session.user_id())).await?;
        Ok(certifications.into_iter().map(Certification::fill_number).collect())
    }

    /// Issue a certificate of authenticity for `product_name`.
    ///
    /// The story comes from the newest recording when it has one, otherwise a
    /// generic heritage text naming the artist.
    pub async fn certify(&self, session: &Session, product_name: &str) -> Result<Certification, ContentError> {
        let user_id = session.user_id();
        let recordings: Vec<Recording> = load_collection(self.store(), &keys::recordings(user_id)).await?;

        let story = recordings
            .last()
            .and_then(|r| r.story.clone())
            .unwrap_or_else(|| fallback_story(product_name, session));

        let id = Uuid::new_v4();
        let now = Utc::now();
        let certification = Certification {
            id,
            product_name: product_name.to_string(),
            qr_code: format!("{}/{}/{}", VERIFY_BASE_URL, user_id, now.timestamp_millis()),
            timestamp: now,
            story,
            verified: true,
            certificate_number: Certification::number_for(&id),
        };

        let key = keys::certifications(user_id);
        let mut certifications: Vec<Certification> = load_collection(self.store(), &key).await?;
        certifications.push(certification.clone());
        save_collection(self.store(), &key, &certifications).await?;

        tracing::info!("Certificate {} issued for '{}'", certification.certificate_number, product_name);
        Ok(certification)
    }
}

fn fallback_story(product_name: &str, artist: &impl IdentityProvider) -> String {
    format!(
        "This authentic {} was created by {}, a master {} artist. Each piece represents \
         generations of traditional craftsmanship and cultural heritage.",
        product_name,
        artist.display_name(),
        artist.craft(),
    )
}

#[cfg(test)]
mod tests {
    use crate::models::NewRecording;
    use crate::test_support::signed_in;
    use kalahasta_core::IdentityProvider;

    #[tokio::test]
    async fn test_certify_without_recordings_uses_fallback_story() {
        let (content, _, session) = signed_in().await;

        let cert = content.certify(&session, "Temple Border Saree").await.unwrap();
        assert!(cert.verified);
        assert_eq!(
            cert.story,
            "This authentic Temple Border Saree was created by Lakshmi Devi, a master Kalamkari \
             artist. Each piece represents generations of traditional craftsmanship and cultural heritage."
        );
        assert!(cert
            .qr_code
            .starts_with(&format!("https://kalahasta.com/verify/{}/", session.user_id())));
        assert!(cert.certificate_number.starts_with("KH-"));
        assert_eq!(cert.certificate_number.len(), 9);
    }

    #[tokio::test]
    async fn test_certify_uses_latest_recording_story() {
        let (content, _, session) = signed_in().await;
        let recording = content
            .add_recording(&session, NewRecording { duration: 12, audio: Vec::new() })
            .await
            .unwrap();

        let cert = content.certify(&session, "Wall Hanging").await.unwrap();
        assert_eq!(Some(cert.story.clone()), recording.story);

        let listed = content.list_certifications(&session).await.unwrap();
        assert_eq!(listed, vec![cert]);
    }

    #[tokio::test]
    async fn test_render_certificate() {
        let (content, _, session) = signed_in().await;
        let cert = content.certify(&session, "Runner").await.unwrap();

        let text = cert.render(&session);
        assert!(text.starts_with("KALAHASTA DIGITAL CERTIFICATE OF AUTHENTICITY"));
        assert!(text.contains(&format!("Certificate Number: {}", cert.certificate_number)));
        assert!(text.contains("Artist: Lakshmi Devi"));
        assert!(text.contains("Craft: Kalamkari"));
        assert_eq!(cert.file_name(), format!("KalaHasta_Certificate_{}.txt", cert.certificate_number));
    }
}
