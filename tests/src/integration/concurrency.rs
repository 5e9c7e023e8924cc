//! # Concurrency and Reentrancy
//!
//! Guarantees under contention: of two racing same-nonce submissions exactly
//! one wins, and a forwarded payload that calls back into the service
//! cannot reuse the nonce that authorized it.

#[cfg(test)]
mod tests {
    use crate::support::{TestRig, TestSigner, CHAIN_ID, FORWARDER_ADDR};
    use forwarder::adapters::bus::NullAuditSink;
    use forwarder::adapters::clock::ManualClock;
    use forwarder::ports::outbound::{CallExecutor, ExecutorError};
    use forwarder::service::ForwarderService;
    use forwarder::{ForwarderApi, ForwarderError};
    use parking_lot::Mutex;
    use shared_types::{
        Address, CallOutcome, EcdsaSignature, ForwardRequest, ForwarderConfig, U256,
    };
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_same_nonce_submissions_exactly_one_wins() {
        let rig = TestRig::new();

        // Two distinct owner-signed requests competing for nonce 0
        let mut first = rig.request(0);
        first.destination = [0x01; 20];
        let first_sig = rig.owner_signature(&first);

        let mut second = rig.request(0);
        second.destination = [0x02; 20];
        let second_sig = rig.owner_signature(&second);

        let submitter = TestSigner::random().address;
        let service_a = rig.service.clone();
        let service_b = rig.service.clone();

        let (res_a, res_b) = tokio::join!(
            tokio::spawn(async move { service_a.authorized_call(submitter, first, first_sig).await }),
            tokio::spawn(
                async move { service_b.authorized_call(submitter, second, second_sig).await }
            ),
        );

        let results = [res_a.unwrap(), res_b.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let nonce_losses = results
            .iter()
            .filter(|r| matches!(r, Err(ForwarderError::InvalidNonce { .. })))
            .count();

        assert_eq!(wins, 1);
        assert_eq!(nonce_losses, 1);
        assert_eq!(rig.service.expected_nonce(&rig.owner.address), 1);
    }

    // =========================================================================
    // Reentrancy
    // =========================================================================

    /// One queued inner submission fired from inside a forwarded call.
    type QueuedCall = (Address, ForwardRequest, EcdsaSignature);

    /// Executor whose forwarded call reenters the service it serves.
    #[derive(Default)]
    struct ReentrantExecutor {
        target: Mutex<Option<Arc<dyn ForwarderApi>>>,
        queued: Mutex<Option<QueuedCall>>,
        inner_result: Mutex<Option<Result<CallOutcome, ForwarderError>>>,
    }

    impl ReentrantExecutor {
        fn arm(&self, target: Arc<dyn ForwarderApi>, call: QueuedCall) {
            *self.target.lock() = Some(target);
            *self.queued.lock() = Some(call);
        }

        fn inner_result(&self) -> Option<Result<CallOutcome, ForwarderError>> {
            self.inner_result.lock().clone()
        }
    }

    #[async_trait::async_trait]
    impl CallExecutor for ReentrantExecutor {
        async fn execute(
            &self,
            _destination: Address,
            _value: U256,
            _payload: &[u8],
        ) -> Result<CallOutcome, ExecutorError> {
            let queued = self.queued.lock().take();
            if let Some((caller, request, signature)) = queued {
                let target = self.target.lock().clone();
                if let Some(service) = target {
                    let result = service.authorized_call(caller, request, signature).await;
                    *self.inner_result.lock() = Some(result);
                }
            }
            Ok(CallOutcome::default())
        }
    }

    fn reentrant_rig(owner: &TestSigner) -> (Arc<ForwarderService<Arc<ReentrantExecutor>>>, Arc<ReentrantExecutor>) {
        let executor = Arc::new(ReentrantExecutor::default());
        let service = Arc::new(ForwarderService::new(
            ForwarderConfig {
                chain_id: CHAIN_ID,
                forwarder: FORWARDER_ADDR,
                owner: owner.address,
            },
            executor.clone(),
            Arc::new(ManualClock::at(1_000)),
            Arc::new(NullAuditSink),
        ));
        (service, executor)
    }

    fn never_expiring(nonce: u64) -> ForwardRequest {
        ForwardRequest {
            expiry: U256::MAX,
            nonce,
            destination: [0xBB; 20],
            value: U256::zero(),
            position: U256::zero(),
            payload: vec![],
        }
    }

    #[tokio::test]
    async fn test_reentrant_replay_of_consumed_nonce_fails() {
        let owner = TestSigner::random();
        let (service, executor) = reentrant_rig(&owner);

        let outer = never_expiring(0);
        let outer_sig = owner.sign_digest(&service.request_digest(&outer));

        // The payload "calls back in" with another nonce-0 request
        let inner = never_expiring(0);
        let inner_sig = owner.sign_digest(&service.request_digest(&inner));
        executor.arm(service.clone(), (owner.address, inner, inner_sig));

        // Outer succeeds; the nonce was consumed before execution, so the
        // reentrant submission sees the advanced counter
        service
            .authorized_call(owner.address, outer, outer_sig)
            .await
            .unwrap();

        let inner_result = executor.inner_result().expect("inner call must have run");
        assert_eq!(
            inner_result.unwrap_err(),
            ForwarderError::InvalidNonce {
                expected: 1,
                presented: 0
            }
        );
        assert_eq!(service.expected_nonce(&owner.address), 1);
    }

    #[tokio::test]
    async fn test_reentrant_call_with_next_nonce_composes() {
        let owner = TestSigner::random();
        let (service, executor) = reentrant_rig(&owner);

        let outer = never_expiring(0);
        let outer_sig = owner.sign_digest(&service.request_digest(&outer));

        // A properly sequenced nested call is legitimate composition
        let inner = never_expiring(1);
        let inner_sig = owner.sign_digest(&service.request_digest(&inner));
        executor.arm(service.clone(), (owner.address, inner, inner_sig));

        service
            .authorized_call(owner.address, outer, outer_sig)
            .await
            .unwrap();

        let inner_result = executor.inner_result().expect("inner call must have run");
        assert!(inner_result.is_ok());
        assert_eq!(service.expected_nonce(&owner.address), 2);
    }
}
