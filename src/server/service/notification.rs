//! Outgoing notifications.
//!
//! Wraps the `Mailer` collaborator with the messages the platform sends. Delivery failures
//! are logged and never fail the request that triggered them.

use crate::server::{
    mailer::{Email, Mailer},
    model::{course::Course, user::User},
};

pub struct NotificationService<'a> {
    mailer: &'a dyn Mailer,
}

impl<'a> NotificationService<'a> {
    pub fn new(mailer: &'a dyn Mailer) -> Self {
        Self { mailer }
    }

    pub async fn verification_link(&self, user: &User, link: &str) -> bool {
        self.deliver(Email {
            to: user.email.clone(),
            subject: "Verify Your Email".to_string(),
            body: format!(
                "Hello {}, please verify your email by opening this link: {}\n\
                 The link expires in 24 hours. You can also sign in and request a verification code.",
                user.first_name, link
            ),
        })
        .await
    }

    pub async fn verification_code(&self, user: &User, code: &str) -> bool {
        self.deliver(Email {
            to: user.email.clone(),
            subject: "Your Verification Code".to_string(),
            body: format!(
                "Hello {}, your verification code is {}. It expires in 24 hours.",
                user.first_name, code
            ),
        })
        .await
    }

    pub async fn forgot_password_code(&self, user: &User, code: &str) -> bool {
        self.deliver(Email {
            to: user.email.clone(),
            subject: "Password Reset Code".to_string(),
            body: format!(
                "Hello {}, your password reset code is {}. It expires in 5 minutes.",
                user.first_name, code
            ),
        })
        .await
    }

    /// Confirms a completed enrollment to the learner.
    pub async fn enrollment_confirmed(&self, user: &User, course: &Course) -> bool {
        self.deliver(Email {
            to: user.email.clone(),
            subject: format!("Enrollment Confirmed: {}", course.title),
            body: format!(
                "Hello {}, you are now enrolled in \"{}\". Happy learning!",
                user.first_name, course.title
            ),
        })
        .await
    }

    /// Sends an announcement to every recipient.
    ///
    /// # Returns
    /// - `usize` - Number of recipients the mailer accepted
    pub async fn course_announcement(
        &self,
        course: &Course,
        recipients: &[User],
        subject: &str,
        message: &str,
    ) -> usize {
        let mut delivered = 0;

        for user in recipients {
            let sent = self
                .deliver(Email {
                    to: user.email.clone(),
                    subject: format!("[{}] {}", course.title, subject),
                    body: format!("Hello {},\n\n{}", user.first_name, message),
                })
                .await;
            if sent {
                delivered += 1;
            }
        }

        delivered
    }

    async fn deliver(&self, email: Email) -> bool {
        let to = email.to.clone();
        match self.mailer.send(email).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send email to {}: {}", to, e);
                false
            }
        }
    }
}
