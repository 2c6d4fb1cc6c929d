use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Background pool for work that must never run on the tick thread.
pub struct JobSystem {
    pool: ThreadPool,
}

impl JobSystem {
    pub fn new(num_threads: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|index| format!("blockinfo-job-{index}"));
        if let Some(count) = num_threads {
            builder = builder.num_threads(count);
        }

        let pool = builder.build()?;
        Ok(Self { pool })
    }

    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(job);
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::JobSystem;
    use crate::replies::reply_queue;

    #[test]
    fn spawned_jobs_report_back() {
        let jobs = JobSystem::new(Some(2)).expect("pool should build");
        assert_eq!(jobs.threads(), 2);

        let (tx, queue) = reply_queue();
        for value in 0..4 {
            let tx = tx.clone();
            jobs.spawn(move || {
                tx.send(value * 10).expect("queue should be alive");
            });
        }
        drop(tx);

        let mut results: Vec<i32> = queue.wait_all();
        results.sort_unstable();
        assert_eq!(results, vec![0, 10, 20, 30]);
    }
}
