//! HTML bodies for the transactional emails.

/// Confirmation sent to an applicant after a successful submission.
pub fn application_received_html(applicant_name: &str, job_title: &str, company_name: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 20px auto; padding: 20px; border: 1px solid #ddd; border-radius: 8px;">
      <h1 style="background-color: #28a745; color: white; padding: 10px; text-align: center;">Application Received!</h1>
      <h2>Hi {applicant_name},</h2>
      <p>We've successfully received your application for the <strong>{job_title}</strong> position at <strong>{company_name}</strong>.</p>
      <p>Your profile is now under review. We'll get back to you if your qualifications match the role.</p>
      <p>You can track the status of all your applications on your dashboard.</p>
    </div>
  </body>
</html>"#
    )
}

/// Confirmation sent to an employer after posting a job.
pub fn job_posted_html(employer_name: &str, job_title: &str, company_name: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 20px auto; padding: 20px; border: 1px solid #ddd; border-radius: 8px;">
      <h1 style="background-color: #007bff; color: white; padding: 10px; text-align: center;">Job Posted Successfully!</h1>
      <h2>Congratulations, {employer_name}!</h2>
      <p>Your job posting for <strong>{job_title}</strong> at <strong>{company_name}</strong> is now live.</p>
      <p>We'll notify you as applications start coming in. You can manage your postings from your dashboard.</p>
    </div>
  </body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_email_mentions_job_and_company() {
        let html = application_received_html("Asha", "Backend Engineer", "JobConnect");
        assert!(html.contains("Asha"));
        assert!(html.contains("Backend Engineer"));
        assert!(html.contains("JobConnect"));
    }

    #[test]
    fn test_job_posted_email_mentions_title() {
        let html = job_posted_html("Priya", "Data Analyst", "Acme");
        assert!(html.contains("Data Analyst"));
        assert!(html.contains("Acme"));
    }
}
