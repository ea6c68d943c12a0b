pub fn generate_job_route(job_id: &str) -> String {
    format!("/generate/{}", job_id)
}
