//! AES加解密入口 <br>
//!
//! 按密钥长度(16/24/32字节)选择AES-128/192/256, 按[`Mode`]处理任意长度的消息. <br>
//! ECB/CBC固定使用[`Pkcs7Padding`](crate::cipher_mode::Pkcs7Padding), CTR不填充. <br>
//! 其它分组密码(如DES)直接使用[`Mode::encrypt`]/[`Mode::decrypt`].

use crate::block_cipher::AES;
use crate::cipher_mode::Mode;
use crate::CipherError;

/// 密钥扩展, 密钥长度不是16/24/32字节时返回`InvalidKeyLength`
pub fn expand_key(key: &[u8]) -> Result<AES, CipherError> {
    let aes = AES::new(key)?;
    log::debug!("expand AES-{} key, {} rounds", key.len() << 3, aes.rounds());
    Ok(aes)
}

pub fn encrypt(
    mode: Mode,
    schedule: &AES,
    iv: Option<&[u8]>,
    plaintext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    log::debug!("{mode} encrypt {} bytes", plaintext.len());
    mode.encrypt::<AES, { AES::BLOCK_SIZE }>(schedule, iv, plaintext)
}

pub fn decrypt(
    mode: Mode,
    schedule: &AES,
    iv: Option<&[u8]>,
    ciphertext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    log::debug!("{mode} decrypt {} bytes", ciphertext.len());
    mode.decrypt::<AES, { AES::BLOCK_SIZE }>(schedule, iv, ciphertext)
}

/// 加密并输出`IV || 密文`(ECB只有密文)
pub fn seal(
    mode: Mode,
    schedule: &AES,
    iv: Option<&[u8]>,
    plaintext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    log::debug!("{mode} seal {} bytes", plaintext.len());
    mode.seal::<AES, { AES::BLOCK_SIZE }>(schedule, iv, plaintext)
}

pub fn open(mode: Mode, schedule: &AES, framed: &[u8]) -> Result<Vec<u8>, CipherError> {
    log::debug!("{mode} open {} bytes", framed.len());
    mode.open::<AES, { AES::BLOCK_SIZE }>(schedule, framed)
}
