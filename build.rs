use std::cmp::Ordering;
use std::env;
use std::process::Command;

// Vector extensions that decide the native window width
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    register_bytes: usize,
    detected: bool,
    nightly_only: bool,
}

impl CpuFeature {
    // Wider registers win (lowest number == highest priority)
    fn priority(&self) -> usize {
        match self.name {
            "avx512f" => 0,
            "avx2" => 1,
            "neon" => 2,
            "sse4_1" => 3,
            _ => usize::MAX,
        }
    }

    fn all() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "sse4_1",
                cfg_flag: "sse",
                register_bytes: 16,
                detected: false,
                nightly_only: false,
            },
            CpuFeature {
                name: "avx2",
                cfg_flag: "avx2",
                register_bytes: 32,
                detected: false,
                nightly_only: false,
            },
            CpuFeature {
                name: "avx512f",
                cfg_flag: "avx512",
                register_bytes: 64,
                detected: false,
                nightly_only: true,
            },
            CpuFeature {
                name: "neon",
                cfg_flag: "neon",
                register_bytes: 16,
                detected: false,
                nightly_only: false,
            },
        ]
    }

    // AVX-512 windows are only selected on nightly toolchains
    fn for_channel(channel: &str) -> Vec<CpuFeature> {
        Self::all()
            .into_iter()
            .filter(|feature| channel == "nightly" || !feature.nightly_only)
            .collect()
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                // aarch64 kernels report NEON as "asimd"
                feature.detected = match feature.name {
                    "neon" => contents.contains("neon") || contents.contains("asimd"),
                    name => contents.contains(name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                feature.detected = match feature.name {
                    "avx512f" => contents.contains("hw.optional.avx512f: 1"),
                    "avx2" => contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => contents.contains("hw.optional.sse4_1: 1"),
                    "neon" => {
                        contents.contains("hw.optional.neon: 1")
                            || contents.contains("hw.optional.arm.fp_simd: 1")
                    }
                    _ => false,
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn compiler_channel() -> &'static str {
        let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

        match Command::new(rustc).args(["--version", "--verbose"]).output() {
            Ok(output) if String::from_utf8_lossy(&output.stdout).contains("nightly") => {
                "nightly"
            }
            _ => "stable",
        }
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        if let Some(detector) = Self::cpu_features_detectors()
            .into_iter()
            .find(|detector| detector.is_applicable())
        {
            detector.detect_features(features);
        }
    }

    fn apply(features: &mut [CpuFeature]) {
        features.sort();

        // No detected extension means 16-byte portable windows
        let (cfg_flag, register_bytes) = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected)
            .map(|cpu_feature| (cpu_feature.cfg_flag, cpu_feature.register_bytes))
            .unwrap_or(("fallback", 16));

        println!("selected: {cfg_flag} ({register_bytes}-byte windows)");
        println!("cargo:rustc-cfg={cfg_flag}");

        for flag in ["avx512", "avx2", "sse", "neon", "fallback"] {
            println!("cargo::rustc-check-cfg=cfg({flag})");
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let channel = PlatformDetector::compiler_channel();
    let mut features = CpuFeature::for_channel(channel);

    // Host detection says nothing about a cross target
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    PlatformDetector::apply(&mut features);
}
