mod common;

use common::{Pipe, init_test_logging};
use sockmux::multiplexer::{DescriptorSet, Multiplexer, Timeout, WaitPrimitive, wait};
use sockmux::MultiplexError;

use libc::c_int;
use std::cell::RefCell;
use std::io::{self, Write};
use std::net::{TcpListener, TcpStream};
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::{Duration, Instant};

const GENEROUS: Duration = Duration::from_secs(5);

#[test]
fn empty_lists_with_zero_timeout_return_empty() {
    init_test_logging();

    let ready = wait(&[], &[], &[], Timeout::immediate()).expect("wait");

    assert!(ready.is_empty());
}

#[test]
fn zero_timeout_returns_promptly_when_nothing_is_ready() {
    init_test_logging();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let fd = listener.as_raw_fd();

    let started = Instant::now();
    let ready = wait(&[fd], &[], &[fd], Timeout::immediate()).expect("wait");

    assert!(ready.is_empty());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn short_timeout_elapses_with_empty_result() {
    let pipe = Pipe::new();

    let timeout = Timeout::from(Duration::from_millis(20));

    let ready = wait(&[pipe.read], &[], &[], timeout).expect("wait");

    assert!(ready.is_empty());
}

#[test]
fn listener_with_pending_connection_is_readable() {
    init_test_logging();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let _client = TcpStream::connect(addr).expect("connect");
    let fd = listener.as_raw_fd();

    let ready = wait(&[fd], &[], &[], Timeout::from(GENEROUS)).expect("wait");

    assert_eq!(ready.reads, vec![fd]);
    assert!(ready.writes.is_empty());
}

#[test]
fn connected_stream_is_writable() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let client = TcpStream::connect(listener.local_addr().unwrap()).expect("connect");
    let (_server, _) = listener.accept().expect("accept");
    let fd = client.as_raw_fd();

    let ready = wait(&[], &[fd], &[], Timeout::from(GENEROUS)).expect("wait");

    assert_eq!(ready.writes, vec![fd]);
    assert!(ready.reads.is_empty());
}

#[test]
fn same_descriptor_can_be_watched_in_every_list() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let client = TcpStream::connect(listener.local_addr().unwrap()).expect("connect");
    let (mut server, _) = listener.accept().expect("accept");
    server.write_all(b"x").expect("write");
    let fd = client.as_raw_fd();

    let ready = wait(&[fd], &[fd], &[fd], Timeout::from(GENEROUS)).expect("wait");

    assert_eq!(ready.reads, vec![fd]);
    assert_eq!(ready.writes, vec![fd]);
    assert!(ready.errors.is_empty());
}

#[test]
fn ready_lists_keep_input_order() {
    init_test_logging();
    let first = Pipe::new();
    let second = Pipe::new();
    let idle = Pipe::new();

    second.send(7);
    let ready = wait(
        &[first.read, idle.read, second.read],
        &[],
        &[],
        Timeout::from(GENEROUS),
    )
    .expect("wait");
    assert_eq!(ready.reads, vec![second.read]);

    first.send(8);
    let ready = wait(
        &[second.read, idle.read, first.read],
        &[],
        &[],
        Timeout::from(GENEROUS),
    )
    .expect("wait");
    assert_eq!(ready.reads, vec![second.read, first.read]);
}

#[test]
fn outputs_are_subsets_of_inputs() {
    let pipes: Vec<Pipe> = (0..4).map(|_| Pipe::new()).collect();
    pipes[1].send(1);
    pipes[3].send(1);

    let reads: Vec<RawFd> = pipes.iter().map(|pipe| pipe.read).collect();
    let writes: Vec<RawFd> = pipes.iter().rev().map(|pipe| pipe.write).collect();

    let ready = wait(&reads, &writes, &reads, Timeout::from(GENEROUS)).expect("wait");

    assert!(ready.reads.iter().all(|fd| reads.contains(fd)));
    assert!(ready.writes.iter().all(|fd| writes.contains(fd)));
    assert!(ready.errors.iter().all(|fd| reads.contains(fd)));
    assert_eq!(ready.reads, vec![pipes[1].read, pipes[3].read]);
    assert_eq!(ready.writes, writes);
}

#[test]
fn out_of_range_descriptor_is_rejected_before_waiting() {
    let recorder = Recorder::default();
    let multiplexer = Multiplexer::with_primitive(recorder);
    let too_large = DescriptorSet::capacity() as RawFd;

    let result = multiplexer.wait(&[], &[too_large], &[], Timeout::Never);

    assert!(matches!(
        result,
        Err(MultiplexError::DescriptorOutOfRange(fd)) if fd == too_large
    ));
    assert!(multiplexer.primitive().calls.borrow().is_empty());
}

#[test]
fn primitive_receives_exclusive_upper_bound_and_timeout() {
    let multiplexer = Multiplexer::with_primitive(Recorder::default());
    let timeout = Timeout::from_parts(1, 250);

    multiplexer
        .wait(&[4, 9], &[2], &[11, 3], timeout)
        .expect("wait");
    multiplexer
        .wait(&[], &[], &[], Timeout::Never)
        .expect("wait");

    let calls = multiplexer.primitive().calls.borrow();
    assert_eq!(*calls, vec![(12, timeout), (0, Timeout::Never)]);
}

#[test]
fn primitive_failure_carries_input_lists() {
    init_test_logging();
    let multiplexer = Multiplexer::with_primitive(Failing);

    let err = multiplexer
        .wait(&[5, 3], &[3], &[], Timeout::immediate())
        .expect_err("wait should fail");

    match err {
        MultiplexError::WaitFailed {
            reads,
            writes,
            errors,
            source,
        } => {
            assert_eq!(reads, vec![5, 3]);
            assert_eq!(writes, vec![3]);
            assert!(errors.is_empty());
            assert_eq!(source.raw_os_error(), Some(libc::EBADF));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn only_descriptors_left_in_sets_are_reported() {
    let multiplexer = Multiplexer::with_primitive(ReadyOnly(vec![8, 2]));

    let ready = multiplexer
        .wait(&[1, 2, 8, 2], &[8, 5], &[2], Timeout::Never)
        .expect("wait");

    assert_eq!(ready.reads, vec![2, 8, 2]);
    assert_eq!(ready.writes, vec![8]);
    assert_eq!(ready.errors, vec![2]);
}

#[test]
fn zero_count_means_timeout_even_if_bits_remain() {
    let multiplexer = Multiplexer::with_primitive(Recorder::default());

    let ready = multiplexer
        .wait(&[1, 2], &[3], &[], Timeout::immediate())
        .expect("wait");

    assert!(ready.is_empty());
}

/// Leaves every set untouched and reports a timeout.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(c_int, Timeout)>>,
}

impl WaitPrimitive for Recorder {
    fn wait(
        &self,
        upper_bound: c_int,
        _reads: &mut DescriptorSet,
        _writes: &mut DescriptorSet,
        _errors: &mut DescriptorSet,
        timeout: Timeout,
    ) -> io::Result<usize> {
        self.calls.borrow_mut().push((upper_bound, timeout));
        Ok(0)
    }
}

struct Failing;

impl WaitPrimitive for Failing {
    fn wait(
        &self,
        _upper_bound: c_int,
        _reads: &mut DescriptorSet,
        _writes: &mut DescriptorSet,
        _errors: &mut DescriptorSet,
        _timeout: Timeout,
    ) -> io::Result<usize> {
        Err(io::Error::from_raw_os_error(libc::EBADF))
    }
}

/// Keeps only the listed descriptors in each set.
struct ReadyOnly(Vec<RawFd>);

impl WaitPrimitive for ReadyOnly {
    fn wait(
        &self,
        _upper_bound: c_int,
        reads: &mut DescriptorSet,
        writes: &mut DescriptorSet,
        errors: &mut DescriptorSet,
        _timeout: Timeout,
    ) -> io::Result<usize> {
        let mut count = 0;

        for set in [reads, writes, errors] {
            let keep: Vec<RawFd> = self
                .0
                .iter()
                .copied()
                .filter(|&fd| set.contains(fd))
                .collect();

            set.clear();
            for fd in keep {
                set.insert(fd).expect("in range");
                count += 1;
            }
        }

        Ok(count)
    }
}
