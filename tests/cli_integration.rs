//! Integration tests for the `meshgraph` binary.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// `ground -hip- femur -knee- tibia`, with a mesh and a station on the femur.
const LEG: &str = r#"
version = 1
selected = [2]

[[elements]]
kind = "body"
id = 2
label = "femur"

[[elements]]
kind = "body"
id = 3
label = "tibia"

[[elements]]
kind = "joint"
id = 4
label = "hip"
joint_type = "pin"
parent = 1
child = 2

[[elements]]
kind = "joint"
id = 5
label = "knee"
joint_type = "pin"
parent = 2
child = 3

[[elements]]
kind = "mesh"
id = 6
label = "femur_r"
parent = 2
path = "meshes/femur_r.vtp"

[[elements]]
kind = "station"
id = 7
label = "marker"
parent = 2
location = [0.0, -0.2, 0.0]
"#;

/// Two bodies jointed to each other but never to ground.
const LOOP: &str = r#"
version = 1

[[elements]]
kind = "body"
id = 2
label = "a"

[[elements]]
kind = "body"
id = 3
label = "b"

[[elements]]
kind = "joint"
id = 4
parent = 2
child = 3

[[elements]]
kind = "joint"
id = 5
parent = 3
child = 2
"#;

const LOOSE: &str = r#"
[[elements]]
kind = "body"
id = 2
label = "loose"
"#;

fn meshgraph() -> Command {
    let mut cmd = Command::cargo_bin("meshgraph").unwrap();
    // keep the user's own config out of the way
    cmd.env("MESHGRAPH_CONFIG", "/nonexistent/meshgraph.toml");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn scene(temp: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let file = temp.child(name);
    file.write_str(contents).unwrap();
    file.path().to_path_buf()
}

#[test]
fn help_lists_commands() {
    meshgraph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn check_passes_grounded_scene() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);

    meshgraph()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues (7 elements)"));
}

#[test]
fn check_fails_on_joint_loop() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "loop.toml", LOOP);

    meshgraph()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "a: body is not attached to ground: it is connected by a joint that, itself, does not connect to ground",
        ))
        .stderr(predicate::str::contains("2 issue(s) found"));
}

#[test]
fn check_json_output() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "loop.toml", LOOP);

    meshgraph()
        .args(["check", "--json"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""issue": "not_attached_to_ground""#));
}

#[test]
fn project_config_makes_floating_bodies_fail() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "loose.toml", LOOSE);

    meshgraph().arg("check").arg(&path).assert().success();

    temp.child(".meshgraph/config.toml")
        .write_str("[validation]\nfloating_bodies_attached = false\n")
        .unwrap();

    meshgraph()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("it is not the child of any joint"));
}

#[test]
fn config_flag_replaces_global_config() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "loose.toml", LOOSE);
    let config = temp.child("strict.toml");
    config
        .write_str("[validation]\nfloating_bodies_attached = false\n")
        .unwrap();

    meshgraph()
        .arg("--config")
        .arg(config.path())
        .arg("check")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn check_rejects_unparseable_scene() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "broken.json", "{ not json");

    meshgraph()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON scene"));
}

#[test]
fn check_rejects_dangling_reference() {
    let temp = TempDir::new().unwrap();
    let path = scene(
        &temp,
        "dangling.toml",
        "[[elements]]\nkind = \"mesh\"\nid = 2\nlabel = \"m\"\nparent = 99\npath = \"m.obj\"\n",
    );

    meshgraph()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist in the document"));
}

#[test]
fn list_prints_every_element() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);

    meshgraph()
        .arg("list")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tGround\tground\t(scene origin)"))
        .stdout(predicate::str::contains("2*\tBody\tfemur\t(Body)"))
        .stdout(predicate::str::contains("5\tJoint\tknee\t(PinJoint, tibia --> femur)"))
        .stdout(predicate::str::contains(
            "6\tMesh\tfemur_r\t(Mesh, femur_r.vtp, attached to femur)",
        ));
}

#[test]
fn list_filters_by_kind() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);

    meshgraph()
        .args(["list", "--kind", "joint"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("hip"))
        .stdout(predicate::str::contains("knee"))
        .stdout(predicate::str::contains("femur\t(Body)").not());
}

#[test]
fn delete_previews_without_writing() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);

    meshgraph()
        .args(["delete"])
        .arg(&path)
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("removes 5 element(s)"))
        .stderr(predicate::str::contains("dry run"));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), LEG);
}

#[test]
fn delete_writes_result() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);
    let out = temp.child("out.json");

    meshgraph()
        .arg("delete")
        .arg(&path)
        .arg("5")
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 6 element(s)"));

    out.assert(predicate::path::exists());
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(!written.contains("\"knee\""));
    assert!(written.contains("\"tibia\""));

    meshgraph().arg("check").arg(out.path()).assert().success();
}

#[test]
fn delete_refuses_ground_and_unknown_ids() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);

    meshgraph()
        .arg("delete")
        .arg(&path)
        .arg("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be deleted"));

    meshgraph()
        .arg("delete")
        .arg(&path)
        .arg("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No element with id 42"));
}

#[test]
fn quiet_suppresses_success_output() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "leg.toml", LEG);

    meshgraph()
        .args(["-q", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn completion_generates_script() {
    meshgraph()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("meshgraph"));
}

/// A joint whose parent is a body and whose child is a mesh on that body.
const GARBAGE: &str = r#"
[[elements]]
kind = "body"
id = 2
label = "pelvis"

[[elements]]
kind = "mesh"
id = 3
label = "pelvis_mesh"
parent = 2
path = "pelvis.obj"

[[elements]]
kind = "joint"
id = 4
label = "bad"
parent = 2
child = 3
"#;

#[test]
fn delete_refuses_scene_with_garbage_joints() {
    let temp = TempDir::new().unwrap();
    let path = scene(&temp, "garbage.toml", GARBAGE);
    let out = temp.child("out.toml");

    meshgraph()
        .arg("delete")
        .arg(&path)
        .arg("2")
        .arg("--output")
        .arg(out.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("contains garbage joints"))
        .stderr(predicate::str::contains("panicked").not());

    out.assert(predicate::path::missing());

    meshgraph()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad (4)"));
}
